use nlp_bridge::cli::{self, NlpbArgs};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    // Load configuration from CLI, environment, and config files.
    let args = NlpbArgs::load().map_err(|e| e.to_string())?;
    let stdout = std::io::stdout();
    cli::run(&args, &mut stdout.lock())?;
    Ok(())
}
