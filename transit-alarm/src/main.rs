use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_alarm::config::AppConfig;
use transit_alarm::controller::AlarmController;
use transit_alarm::location::SimulatedLocationProvider;
use transit_alarm::stops::{CachedStopResolver, StopCacheConfig, TranslinkClient, TranslinkConfig};
use transit_alarm::ui::HeadlessPresenter;
use transit_alarm::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Stop resolver
    let client = TranslinkClient::new(
        TranslinkConfig::new(&config.api_key).with_base_url(&config.base_url),
    )?;
    let resolver = CachedStopResolver::new(client, &StopCacheConfig::default());

    // One provider, owned by the one controller
    let mut controller = AlarmController::new(SimulatedLocationProvider::new(), HeadlessPresenter::new())
        .with_radius(config.monitor_radius_m);
    controller.launch();
    controller.process_pending_events();

    let app = create_router(AppState::new(resolver, controller));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Transit Alarm listening on http://{}", config.listen_addr);
    info!("API Endpoints:");
    info!("  GET  /state                 - Current screen state");
    info!("  POST /stop/search           - Look up a stop number");
    info!("  POST /monitoring/toggle     - GO / STOP");
    info!("  POST /dialog/respond        - Answer the dialog on screen");
    info!("  POST /device/location       - Simulate a GPS fix");
    info!("  POST /device/authorization  - Simulate a permission change");
    info!("  POST /device/activity       - Simulate foreground/background");

    axum::serve(listener, app).await?;
    Ok(())
}
