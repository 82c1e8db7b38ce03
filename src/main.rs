use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volscan::render::{render_json, render_text};
use volscan::services::discover;
use volscan::{Config, ReportFormat, VolatilityScanner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volscan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().with_args(std::env::args().skip(1));
    info!("Scanning {} for *.{} trade logs", config.directory.display(), config.file_extension);

    let files = match discover(&config.directory, &config.file_extension) {
        Ok(files) => files,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };

    let scanner = VolatilityScanner::new(config.scanner());
    let outcome = scanner.run(files).await;

    let rendered = match config.report_format {
        ReportFormat::Text => render_text(&outcome.report),
        ReportFormat::Json => render_json(&outcome.report)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }

    Ok(())
}
