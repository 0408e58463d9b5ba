pub mod bytes;
pub mod checkpoint;
pub mod constants;
pub mod execution_payload;
pub mod fork;
pub mod header;
pub mod serde;
pub mod sync_aggregate;
pub mod sync_committee;
