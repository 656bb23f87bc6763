use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use dialoguer::Confirm;
use sweeper_lib::util::progress::create_spinner;
use sweeper_lib::{
    Config, LocalSessionFactory, Result, RunLog, SessionPool, SweepEngine, SweepOptions,
    SweepStats,
};

pub fn handle_run_command(config: &Config, dry_run: bool, yes: bool, json: bool) -> Result<()> {
    if !dry_run && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete expired drop folders under {}?",
                config.root
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", style("Aborted").yellow());
            return Ok(());
        }
    }

    let factory = LocalSessionFactory::new(&config.mount);
    let mut pool = SessionPool::new(factory);
    let mut run_log = RunLog::new(Utc::now());

    let spinner = create_spinner("Sweeping drop folders");
    let stats = {
        let mut engine = SweepEngine::new(
            &mut pool,
            SweepOptions {
                root: config.root.clone(),
                dry_run,
            },
        );
        engine.run(&mut run_log)?
    };
    spinner.finish_and_clear();

    if dry_run {
        log::info!("DRY RUN: run log not stored to {}", config.archive);
    } else {
        pool.with(|session| run_log.store(session, &config.archive))?;
        log::info!(
            "Run log stored as {}/{}",
            config.archive,
            run_log.file_name()
        );
    }

    print_summary(&stats, dry_run);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

fn print_summary(stats: &SweepStats, dry_run: bool) {
    println!("\n{}", style("Sweep Summary").bold().cyan());
    println!("{}", style("─".repeat(80)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Metric").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new(if dry_run { "Would delete" } else { "Deleted" }),
        Cell::new(stats.deleted),
    ]);
    table.add_row(vec![
        Cell::new("Skipped (files present)"),
        Cell::new(stats.skipped_with_files.len()),
    ]);
    println!("{}\n", table);

    for path in &stats.skipped_with_files {
        println!("  {} {}", style("•").yellow(), path);
    }
}
