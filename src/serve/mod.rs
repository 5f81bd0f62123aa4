mod health;
mod pages;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::{debug, info};

use crate::{
    address::{AddressResolver, NATIVE_PREFIX},
    health::HealthCheckable,
    lookup::BalanceLookupService,
    snapshot,
};

use self::health::ServeHealth;

pub type StateExtension = Extension<Arc<State>>;

pub struct State {
    pub health: ServeHealth,
    pub lookup: BalanceLookupService,
}

impl State {
    pub fn new(lookup: BalanceLookupService) -> Self {
        let health = ServeHealth::new(lookup.table().len());
        Self { health, lookup }
    }
}

#[derive(Debug)]
pub struct ServeConfig {
    /// Prefixes accepted next to the native one.
    pub accepted_prefixes: Vec<String>,
    pub genesis_path: PathBuf,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
struct HomeQuery {
    address: Option<String>,
}

// Keeps form input from escaping the path segment it is redirected into.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

async fn home(
    Extension(state): StateExtension,
    Query(HomeQuery { address }): Query<HomeQuery>,
) -> Response {
    match address {
        Some(address) if !address.is_empty() => {
            Redirect::to(&format!("/{}", encode_path_segment(&address))).into_response()
        }
        _ => pages::home(state.lookup.resolver()).into_response(),
    }
}

async fn allocation(
    Extension(state): StateExtension,
    Path(raw_address): Path<String>,
) -> Response {
    match state.lookup.resolve(&raw_address) {
        Ok(allocation) => {
            debug!(
                address = %allocation.address(),
                amount = allocation.display_amount().as_deref().unwrap_or("none"),
                "resolved allocation"
            );
            pages::resolved(&allocation)
        }
        Err(error) => pages::lookup_error(&error, state.lookup.resolver()),
    }
}

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(home))
        .route(
            "/healthz",
            get(|state: StateExtension| async move {
                state.health.health_status().into_response()
            }),
        )
        .route("/:address", get(allocation))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(Extension(state)),
        )
}

pub async fn start_server(config: ServeConfig) -> anyhow::Result<()> {
    let table = snapshot::load_from_path(&config.genesis_path).with_context(|| {
        format!(
            "failed to load genesis snapshot from {}",
            config.genesis_path.display()
        )
    })?;

    let resolver = AddressResolver::new(NATIVE_PREFIX, &config.accepted_prefixes);
    info!(prefixes = ?resolver.accepted_prefixes(), "accepting address prefixes");

    let lookup = BalanceLookupService::new(Arc::new(table), resolver);
    let shared_state = Arc::new(State::new(lookup));

    let app = router(shared_state);

    let socket_addr = tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to resolve {}:{}", config.host, config.port))?
        .next()
        .with_context(|| format!("no address found for {}:{}", config.host, config.port))?;

    info!(%socket_addr, "server listening");
    axum::Server::try_bind(&socket_addr)
        .with_context(|| format!("failed to bind {socket_addr}"))?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
