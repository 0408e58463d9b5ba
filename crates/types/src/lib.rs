#![warn(clippy::unwrap_used)]
#![warn(clippy::uninlined_format_args)]

pub mod consensus;
pub mod light_client;
pub mod utils;
pub mod versioned;

pub use versioned::ForkVersionedResponse;
