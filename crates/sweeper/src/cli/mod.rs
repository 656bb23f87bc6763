pub mod run;
pub mod tree;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sweeper_lib::{Config, Result};

#[derive(Parser)]
#[command(name = "sweeper")]
#[command(about = "Retention sweeper for tenant drop folders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base path holding the company folders")]
    pub root: Option<String>,

    #[arg(long, global = true, help = "Directory receiving the run log")]
    pub archive: Option<String>,

    #[arg(long, global = true, help = "Mount point of the volume to sweep")]
    pub mount: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Walk the tree and delete expired drop folders")]
    Run {
        #[arg(long, short = 'n', help = "Login name for the directory service")]
        name: Option<String>,

        #[arg(long, short = 'p', help = "Login secret for the directory service")]
        password: Option<String>,

        #[arg(long, help = "Evaluate and log without deleting")]
        dry_run: bool,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,

        #[arg(long, help = "Print final statistics as JSON")]
        json: bool,
    },

    #[command(about = "Print the directory tree without deleting")]
    Tree,
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(
        cli.config.clone(),
        cli.root.clone(),
        cli.archive.clone(),
        cli.mount.clone(),
    )
}
