use clap::Parser;
use timestamp_ms::{
    app::App,
    init::{settings::Settings, setup::setup},
    timestamp::TimestampResolver,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Timestamp microservice
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Server address
    #[arg(short, long)]
    address: Option<String>,
    /// HTTP port (defaults to the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,
    /// Config file path
    #[arg(short, long)]
    config_file: Option<String>,
    /// Directory static files are served from
    #[arg(long)]
    public_dir: Option<String>,
    /// Log filter, used when RUST_LOG is not set
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = Settings::new(
        args.config_file,
        args.address,
        args.port,
        args.public_dir,
        args.log_filter,
    )?;

    init_tracing(&settings.log_filter);
    settings.print();

    let resources = match setup(&settings).await {
        Ok(resources) => resources,
        Err(e) => {
            error!("Error during setup: {}", e);
            return Err(e.into());
        }
    };

    let app = App::new(TimestampResolver::default(), resources.public_dir);
    if let Err(e) = app.serve(resources.address).await {
        error!("Server exited with error: {}", e);
        return Err(e.into());
    }

    info!("Server exited");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
