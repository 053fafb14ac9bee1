use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meteo-sync")]
#[command(about = "Sync daily weather observations to a Hugging Face dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one sync cycle: read, plan, fetch, upload
    Sync,

    /// Show what the next sync would do, without fetching or writing
    Plan,
}
