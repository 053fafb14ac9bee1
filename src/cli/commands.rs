use chrono::Duration;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::processors::{RunOutcome, SyncPipeline};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let settings = Settings::from_env()?;
    let pipeline = SyncPipeline::new(settings)?;
    let today = pipeline.today();

    match cli.command {
        Commands::Sync => match pipeline.run(today).await? {
            RunOutcome::Uploaded { rows } => {
                println!("Upload successful ({} rows).", rows);
            }
            RunOutcome::SkippedUpToDate => {
                println!(
                    "Data for {} already exists. Skipping update.",
                    today - Duration::days(1)
                );
            }
            RunOutcome::Aborted(reason) => {
                println!("{}. Aborting.", capitalize(&reason));
            }
        },
        Commands::Plan => {
            let action = pipeline.plan_only(today).await?;
            println!("Next sync would: {}", action.describe());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "meteo_sync=debug" } else { "meteo_sync=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
