use std::sync::Arc;

use tracing::{error, info, warn};

use air_gateway::config::GatewayConfig;
use air_gateway::rest_api;
use reading_store::ReadingStore;
use simulation_clock::{LivePusher, PushScheduler, SimulationClock};
use subscription_service::{HttpNotificationSink, NotificationSink, SubscriptionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting AirWatch gateway");

    // Load configuration
    let config = GatewayConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    // Populate the store up front; a failed load leaves the service
    // queryable and the lazy-load path retries on the next query.
    let store = Arc::new(ReadingStore::new(config.store.clone()));
    match store.load() {
        Ok(report) if report.clean => {
            info!(sites = report.sites, readings = report.readings, "Data loaded and processed successfully.")
        }
        Ok(report) => warn!(
            sites = report.sites,
            readings = report.readings,
            "Catalogue loaded with coercion failures; continuing with partial data"
        ),
        Err(e) => error!("Failed to load json data: {e}"),
    }

    let clock = Arc::new(SimulationClock::new(config.pusher.epoch));
    let registry = Arc::new(SubscriptionRegistry::new());
    let sink: Arc<dyn NotificationSink> = Arc::new(HttpNotificationSink::new(registry.clone())?);
    let pusher =
        Arc::new(LivePusher::new(store.clone(), clock, sink, config.pusher.clone()));

    // The tick loop runs on its own task; on-demand lookups stay on the
    // request path.
    PushScheduler::new(pusher.clone()).spawn();

    let addr = config.bind_addr()?;
    let routes = rest_api::create_routes(store, registry, pusher);

    info!("Listening on {addr}");
    warp::serve(routes).run(addr).await;

    Ok(())
}
