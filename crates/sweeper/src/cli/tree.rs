use console::style;
use sweeper_lib::{Config, LocalSessionFactory, Result, SessionFactory, TreeLines};

pub fn handle_tree_command(config: &Config) -> Result<()> {
    let factory = LocalSessionFactory::new(&config.mount);
    let mut session = factory.connect()?;

    println!("{}", style(&config.root).bold());
    for line in TreeLines::new(&mut session, &config.root) {
        println!("{}", line?);
    }

    Ok(())
}
