pub mod bootstrap;
pub mod finality_update;
pub mod header;
pub mod optimistic_update;
pub mod update;

pub use bootstrap::LightClientBootstrap;
pub use finality_update::LightClientFinalityUpdate;
pub use header::LightClientHeader;
pub use optimistic_update::LightClientOptimisticUpdate;
pub use update::LightClientUpdate;
