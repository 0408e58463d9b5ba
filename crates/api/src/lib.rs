#![warn(clippy::unwrap_used)]
#![warn(clippy::uninlined_format_args)]

//! Beacon API light client endpoints: bootstrap, updates by period range, and the latest
//! finality and optimistic updates, assembled from a node's block and state storage.

pub mod api;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod http;
pub mod provider;
pub mod range;
pub mod selector;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::LightClientApi;
pub use config::LightClientConfig;
pub use errors::LightClientApiError;
pub use http::{router, serve};
