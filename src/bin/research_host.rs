//! Research assistant host binary.
//!
//! Serves the research form on `0.0.0.0:$PORT` (default 8080) and appends
//! every submission to the research log in the working directory.
//!
//! Diagnostic output goes to stderr; set `RUST_LOG` to adjust verbosity.

use research_assistant::{AppConfig, Researcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_environment()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;

    tracing::info!(
        log_path = %config.log_path.display(),
        max_results = config.lookup.max_results,
        "research-host starting"
    );

    let researcher = Researcher::live(&config);
    research_assistant::server::serve(&config, researcher)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "research-host exited with error");
            anyhow::anyhow!("research-host failed: {e}")
        })?;

    tracing::info!("research-host shut down cleanly");
    Ok(())
}
