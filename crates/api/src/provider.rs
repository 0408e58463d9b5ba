//! Read-only views over the node's chain storage.
//!
//! Blocks and states are owned by the host node; this crate only ever reads the handful of
//! fields it needs through [`BeaconBlockView`] and [`BeaconStateView`].

use std::{collections::BTreeMap, sync::Arc};

use alloy_primitives::B256;
use anyhow::Result;
use async_trait::async_trait;
use lc_types::{
    consensus::{
        checkpoint::Checkpoint, fork::ForkName, header::BeaconBlockHeader,
        sync_aggregate::SyncAggregate,
    },
    light_client::{
        LightClientBootstrap, LightClientFinalityUpdate, LightClientOptimisticUpdate,
        LightClientUpdate,
    },
};

pub trait BeaconBlockView: Send + Sync {
    fn slot(&self) -> u64;

    fn parent_root(&self) -> B256;

    /// `None` for blocks from before the sync committee existed.
    fn sync_aggregate(&self) -> Option<&SyncAggregate>;

    fn num_sync_committee_participants(&self) -> u64 {
        self.sync_aggregate()
            .map(SyncAggregate::num_participants)
            .unwrap_or_default()
    }
}

pub trait BeaconStateView: Send + Sync {
    fn slot(&self) -> u64;

    fn fork_name(&self) -> ForkName;

    fn latest_block_header(&self) -> &BeaconBlockHeader;

    fn hash_tree_root(&self) -> Result<B256>;

    /// `None` when the state has not recorded a finalized checkpoint.
    fn finalized_checkpoint(&self) -> Option<Checkpoint>;
}

#[async_trait]
pub trait BlockProvider: Send + Sync {
    type Block: BeaconBlockView;

    /// Looks up a block by root. `Ok(None)` means the block is unknown.
    async fn block(&self, root: B256) -> Result<Option<Arc<Self::Block>>>;
}

#[async_trait]
pub trait StateProvider: Send + Sync {
    type State: BeaconStateView;

    async fn state_by_slot(&self, slot: u64) -> Result<Arc<Self::State>>;

    async fn head_state(&self) -> Result<Arc<Self::State>>;
}

pub trait ChainInfo: Send + Sync {
    fn current_slot(&self) -> u64;
}

#[async_trait]
pub trait UpdateStore: Send + Sync {
    /// Best stored update for each period in `start_period..=end_period` that has one.
    async fn light_client_updates(
        &self,
        start_period: u64,
        end_period: u64,
    ) -> Result<BTreeMap<u64, LightClientUpdate>>;
}

/// Produces light client payloads, including their merkle branches, from chain objects.
pub trait LightClientBuilder<B, S>: Send + Sync {
    fn bootstrap(&self, current_slot: u64, state: &S, block: &B) -> Result<LightClientBootstrap>;

    fn finality_update(
        &self,
        current_slot: u64,
        state: &S,
        block: &B,
        attested_state: &S,
        attested_block: &B,
        finalized_block: &B,
    ) -> Result<LightClientFinalityUpdate>;

    fn optimistic_update(
        &self,
        current_slot: u64,
        state: &S,
        block: &B,
        attested_state: &S,
        attested_block: &B,
    ) -> Result<LightClientOptimisticUpdate>;
}

/// The collaborators backing the light client endpoints.
pub struct LightClientProviders<B, S>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    pub blocks: Arc<dyn BlockProvider<Block = B>>,
    pub states: Arc<dyn StateProvider<State = S>>,
    pub chain_info: Arc<dyn ChainInfo>,
    pub updates: Arc<dyn UpdateStore>,
    pub builder: Arc<dyn LightClientBuilder<B, S>>,
}

impl<B, S> Clone for LightClientProviders<B, S>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            states: self.states.clone(),
            chain_info: self.chain_info.clone(),
            updates: self.updates.clone(),
            builder: self.builder.clone(),
        }
    }
}
