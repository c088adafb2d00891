//! # cinelist Main Entry Point
//!
//! Loads the profile, fetches the movies and reads navigation commands
//! from stdin until `quit` or end of input.

use anyhow::Result;
use cinelist::{
    airport,
    cmd_args::CommandLineArgs,
    config::{self, AppSettings},
    AppController, ConfiguredSource,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

// Rc-based models keep everything on one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    if let Some(flights) = cmd_args.tower() {
        return run_tower(flights);
    }

    let profile_name = cmd_args.profile();
    let profile_path = config::get_profile_path();
    let mut settings = AppSettings::load(&profile_path, profile_name)?;
    if let Some(start) = cmd_args.start() {
        settings.start_route = start.to_string();
    }

    let source =
        ConfiguredSource::from_settings(settings.source_url.as_deref(), settings.fetch_latency)?;
    tracing::debug!("Data source: {:?}", source);

    println!("cinelist: type 'click <id>', 'go <route>', 'back', 'forward', 'show' or 'quit'");
    let mut app = AppController::new(&settings)?;
    app.run(&source).await
}

fn run_tower(flights: &[u32]) -> Result<()> {
    let landed = airport::simulate(flights)?;
    for number in airport::FLEET {
        let status = if landed.contains(&number) {
            "landed"
        } else {
            "circling"
        };
        println!("flight {number:>5}: {status}");
    }
    Ok(())
}

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(format!(
            "{}_LOG_LEVEL",
            env!("CARGO_PKG_NAME").to_uppercase()
        ))
        .from_env_lossy();
    for noisy in ["reqwest", "hyper", "hyper_util", "tokio", "rustls", "h2"] {
        filter = filter.add_directive(format!("{noisy}=warn").parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
