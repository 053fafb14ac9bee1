use clap::Parser;
use meteo_sync::cli::{run, Cli};
use meteo_sync::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
