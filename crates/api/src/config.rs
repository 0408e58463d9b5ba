use std::net::SocketAddr;

use clap::Args;
use lc_types::consensus::constants::{
    MAX_REQUEST_LIGHT_CLIENT_UPDATES, MIN_SYNC_COMMITTEE_PARTICIPANTS,
};

pub const DEFAULT_LIGHT_CLIENT_HTTP_ADDRESS: &str = "127.0.0.1:5052";

/// Light client endpoint settings, flattenable into a node's command line.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LightClientConfig {
    #[arg(
        long = "enable-light-client",
        help = "Serve the beacon API light client endpoints"
    )]
    pub enabled: bool,

    #[arg(
        default_value_t = MAX_REQUEST_LIGHT_CLIENT_UPDATES,
        long = "light-client.max-request-updates",
        help = "Maximum number of sync committee periods returned by a single updates request"
    )]
    pub max_request_updates: u64,

    #[arg(
        default_value_t = MIN_SYNC_COMMITTEE_PARTICIPANTS,
        long = "light-client.min-sync-committee-participants",
        help = "Minimum sync committee participation for a block to back an optimistic update"
    )]
    pub min_sync_committee_participants: u64,

    #[arg(
        long = "light-client.max-walk-depth",
        help = "Maximum number of parent blocks visited while searching for a sufficiently signed block (unbounded if unset)"
    )]
    pub max_walk_depth: Option<u64>,

    #[arg(
        default_value = DEFAULT_LIGHT_CLIENT_HTTP_ADDRESS,
        long = "light-client.http-address",
        help = "Address to accept light client http connections"
    )]
    pub http_address: SocketAddr,
}

impl LightClientConfig {
    /// Participation required for a finality update: two thirds of the floor, rounded up.
    pub fn finality_min_signatures(&self) -> u64 {
        self.min_sync_committee_participants
            .saturating_mul(2)
            .div_ceil(3)
    }

    pub fn optimistic_min_signatures(&self) -> u64 {
        self.min_sync_committee_participants
    }
}

impl Default for LightClientConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_request_updates: MAX_REQUEST_LIGHT_CLIENT_UPDATES,
            min_sync_committee_participants: MIN_SYNC_COMMITTEE_PARTICIPANTS,
            max_walk_depth: None,
            http_address: SocketAddr::from(([127, 0, 0, 1], 5052)),
        }
    }
}
