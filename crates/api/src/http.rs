use std::sync::Arc;

use alloy_primitives::B256;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
    Router,
};
use lc_types::utils::bytes::hex_decode_fixed;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    api::LightClientApi,
    config::LightClientConfig,
    encoding::{json_response, versioned_response, ContentType},
    errors::LightClientApiError,
    provider::{BeaconBlockView, BeaconStateView, LightClientProviders},
};

pub const LIGHT_CLIENT_ROUTE_PREFIX: &str = "/eth/v1/beacon/light_client";

#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    pub start_period: u64,
    pub count: u64,
}

/// Router serving the light client endpoints under [`LIGHT_CLIENT_ROUTE_PREFIX`].
pub fn router<B, S>(api: Arc<LightClientApi<B, S>>) -> Router
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    let routes = Router::new()
        .route("/bootstrap/{block_root}", get(get_bootstrap::<B, S>))
        .route("/updates", get(get_updates::<B, S>))
        .route("/finality_update", get(get_finality_update::<B, S>))
        .route("/optimistic_update", get(get_optimistic_update::<B, S>))
        .with_state(api);

    Router::new()
        .nest(LIGHT_CLIENT_ROUTE_PREFIX, routes)
        .layer(TraceLayer::new_for_http())
}

/// Serves the light client endpoints on `config.http_address` until the listener fails.
pub async fn serve<B, S>(
    config: LightClientConfig,
    providers: LightClientProviders<B, S>,
) -> anyhow::Result<()>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    let address = config.http_address;
    let api = Arc::new(LightClientApi::new(config, providers));
    let listener = TcpListener::bind(address).await?;
    info!(
        %address,
        enabled = api.config().enabled,
        "Light client API listening"
    );
    axum::serve(listener, router(api)).await?;
    Ok(())
}

fn parse_block_root(block_root: &str) -> Result<B256, LightClientApiError> {
    hex_decode_fixed::<32>(block_root)
        .map(B256::from)
        .map_err(|err| {
            LightClientApiError::BadRequest(format!("invalid block root {block_root:?}: {err}"))
        })
}

async fn get_bootstrap<B, S>(
    State(api): State<Arc<LightClientApi<B, S>>>,
    Path(block_root): Path<String>,
    headers: HeaderMap,
) -> Result<Response, LightClientApiError>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    api.ensure_enabled()?;
    let block_root = parse_block_root(&block_root)?;
    let bootstrap = api.bootstrap(block_root).await?;
    versioned_response(
        ContentType::from_headers(&headers),
        bootstrap,
        "light_client_bootstrap.ssz",
    )
}

async fn get_updates<B, S>(
    State(api): State<Arc<LightClientApi<B, S>>>,
    query: Result<Query<UpdatesQuery>, QueryRejection>,
) -> Result<Response, LightClientApiError>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    api.ensure_enabled()?;
    let Query(query) = query.map_err(|rejection| {
        LightClientApiError::BadRequest(format!("invalid query: {}", rejection.body_text()))
    })?;
    let updates = api.updates_by_range(query.start_period, query.count).await?;
    json_response(&updates, None)
}

async fn get_finality_update<B, S>(
    State(api): State<Arc<LightClientApi<B, S>>>,
    headers: HeaderMap,
) -> Result<Response, LightClientApiError>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    let update = api.finality_update().await?;
    versioned_response(
        ContentType::from_headers(&headers),
        update,
        "light_client_finality_update.ssz",
    )
}

async fn get_optimistic_update<B, S>(
    State(api): State<Arc<LightClientApi<B, S>>>,
    headers: HeaderMap,
) -> Result<Response, LightClientApiError>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    let update = api.optimistic_update().await?;
    versioned_response(
        ContentType::from_headers(&headers),
        update,
        "light_client_optimistic_update.ssz",
    )
}
