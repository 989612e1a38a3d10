use chrono::FixedOffset;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{app, AppState};
use wayfare_booking::{CartValidator, ChargeRules, SlotValidator};
use wayfare_core::{ClockSource, SystemClock};
use wayfare_store::{ClockClient, Config, InventoryClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wayfare_api=debug,wayfare_booking=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.services.request_timeout_seconds))
        .build()
        .expect("Failed to build HTTP client");

    let inventory = Arc::new(InventoryClient::new(
        http.clone(),
        config.services.inventory_base_url.clone(),
    ));

    let clock: Arc<dyn ClockSource> = match &config.services.time_base_url {
        Some(base) => Arc::new(ClockClient::new(http, base.clone())),
        None => Arc::new(SystemClock),
    };

    let business_tz = FixedOffset::east_opt(config.business_rules.utc_offset_minutes * 60)
        .expect("Invalid business timezone offset");

    let slots = Arc::new(SlotValidator::new(inventory, clock, business_tz));
    let cart = Arc::new(CartValidator::new(slots.clone()));

    let state = AppState {
        slots,
        cart,
        rules: ChargeRules {
            tax_rate: config.business_rules.tax_rate,
            booking_fee_rate: config.business_rules.booking_fee_rate,
        },
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
