/// Maximum number of sync committee periods a single `updates` request may span.
pub const MAX_REQUEST_LIGHT_CLIENT_UPDATES: u64 = 128;

/// Minimum number of sync committee participants for a block to carry a light client update.
pub const MIN_SYNC_COMMITTEE_PARTICIPANTS: u64 = 1;

pub const SYNC_COMMITTEE_SIZE: usize = 512;

pub const SLOTS_PER_EPOCH: u64 = 32;
pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;
