mod cli;

use clap::Parser;
use sweeper_lib::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli::load_config(&args)?;

    match args.command {
        cli::Commands::Run {
            name,
            password,
            dry_run,
            yes,
            json,
        } => {
            let config = config.with_credentials(name, password);
            cli::run::handle_run_command(&config, dry_run, yes, json)
        }

        cli::Commands::Tree => cli::tree::handle_tree_command(&config),
    }
}
