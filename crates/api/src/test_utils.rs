#![allow(clippy::unwrap_used)]

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex},
};

use alloy_primitives::B256;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use lc_types::{
    consensus::{
        checkpoint::Checkpoint, fork::ForkName, header::BeaconBlockHeader,
        sync_aggregate::SyncAggregate,
    },
    light_client::{
        bootstrap::{
            LightClientBootstrapBellatrix, LightClientBootstrapCapella, LightClientBootstrapDeneb,
            LightClientBootstrapElectra,
        },
        finality_update::{
            LightClientFinalityUpdateBellatrix, LightClientFinalityUpdateCapella,
            LightClientFinalityUpdateDeneb, LightClientFinalityUpdateElectra,
        },
        optimistic_update::{
            LightClientOptimisticUpdateBellatrix, LightClientOptimisticUpdateCapella,
            LightClientOptimisticUpdateDeneb, LightClientOptimisticUpdateElectra,
        },
        update::{
            LightClientUpdateBellatrix, LightClientUpdateCapella, LightClientUpdateDeneb,
            LightClientUpdateElectra,
        },
        LightClientBootstrap, LightClientFinalityUpdate, LightClientOptimisticUpdate,
        LightClientUpdate,
    },
};
use tree_hash::TreeHash;

use crate::{
    api::LightClientApi,
    config::LightClientConfig,
    provider::{
        BeaconBlockView, BeaconStateView, BlockProvider, ChainInfo, LightClientBuilder,
        LightClientProviders, StateProvider, UpdateStore,
    },
};

#[derive(Debug, Clone)]
pub struct MockBlock {
    pub slot: u64,
    pub parent_root: B256,
    pub sync_aggregate: Option<SyncAggregate>,
}

impl BeaconBlockView for MockBlock {
    fn slot(&self) -> u64 {
        self.slot
    }

    fn parent_root(&self) -> B256 {
        self.parent_root
    }

    fn sync_aggregate(&self) -> Option<&SyncAggregate> {
        self.sync_aggregate.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct MockState {
    pub slot: u64,
    pub fork_name: ForkName,
    pub latest_block_header: BeaconBlockHeader,
    pub state_root: B256,
    pub finalized_checkpoint: Option<Checkpoint>,
    pub fail_hash: bool,
}

impl BeaconStateView for MockState {
    fn slot(&self) -> u64 {
        self.slot
    }

    fn fork_name(&self) -> ForkName {
        self.fork_name
    }

    fn latest_block_header(&self) -> &BeaconBlockHeader {
        &self.latest_block_header
    }

    fn hash_tree_root(&self) -> Result<B256> {
        if self.fail_hash {
            bail!("state hashing failed");
        }
        Ok(self.state_root)
    }

    fn finalized_checkpoint(&self) -> Option<Checkpoint> {
        self.finalized_checkpoint
    }
}

pub fn state_root_for(slot: u64) -> B256 {
    B256::left_padding_from(&(slot + 1).to_be_bytes())
}

pub fn sync_aggregate_with(participants: u64) -> SyncAggregate {
    let mut aggregate = SyncAggregate::default();
    for index in 0..participants as usize {
        aggregate.sync_committee_bits.set(index, true).unwrap();
    }
    aggregate
}

#[derive(Default)]
struct ChainData {
    blocks: HashMap<B256, Arc<MockBlock>>,
    roots: BTreeMap<u64, B256>,
    participants: HashMap<u64, u64>,
    states: HashMap<u64, Arc<MockState>>,
    head_slot: u64,
    updates: BTreeMap<u64, LightClientUpdate>,
    failing_blocks: HashSet<B256>,
    failing_states: HashSet<u64>,
    head_state_fails: bool,
    updates_fail: bool,
    block_lookups: usize,
    state_lookups: usize,
    visited_slots: Vec<u64>,
    update_requests: Vec<(u64, u64)>,
}

/// In-memory linear chain: one block and one post-state per slot, the last block being the
/// head. Every lookup is counted so tests can assert on which collaborators were touched.
pub struct MockChain {
    data: Mutex<ChainData>,
}

impl MockChain {
    /// Builds a chain from `(slot, sync committee participants)` pairs in ascending slot
    /// order. States are on the Deneb fork and finalize the first block.
    pub fn new(blocks: &[(u64, u64)]) -> Self {
        let mut data = ChainData::default();
        let mut parent_root = B256::ZERO;
        for (slot, participants) in blocks.iter().copied() {
            let mut header = BeaconBlockHeader {
                slot,
                proposer_index: slot,
                parent_root,
                state_root: state_root_for(slot),
                body_root: B256::ZERO,
            };
            let root = header.tree_hash_root();
            data.blocks.insert(
                root,
                Arc::new(MockBlock {
                    slot,
                    parent_root,
                    sync_aggregate: Some(sync_aggregate_with(participants)),
                }),
            );
            data.roots.insert(slot, root);
            data.participants.insert(slot, participants);

            header.state_root = B256::ZERO;
            data.states.insert(
                slot,
                Arc::new(MockState {
                    slot,
                    fork_name: ForkName::Deneb,
                    latest_block_header: header,
                    state_root: state_root_for(slot),
                    finalized_checkpoint: None,
                    fail_hash: false,
                }),
            );
            data.head_slot = slot;
            parent_root = root;
        }

        let chain = Self {
            data: Mutex::new(data),
        };
        if let Some((slot, _)) = blocks.first() {
            let root = chain.root_at(*slot);
            for (state_slot, _) in blocks {
                chain.set_finalized_checkpoint(*state_slot, Some(Checkpoint { epoch: 0, root }));
            }
        }
        chain
    }

    pub fn root_at(&self, slot: u64) -> B256 {
        self.data.lock().unwrap().roots[&slot]
    }

    pub fn head_slot(&self) -> u64 {
        self.data.lock().unwrap().head_slot
    }

    pub fn participants_at(&self, slot: u64) -> u64 {
        self.data.lock().unwrap().participants[&slot]
    }

    pub fn block_lookups(&self) -> usize {
        self.data.lock().unwrap().block_lookups
    }

    pub fn state_lookups(&self) -> usize {
        self.data.lock().unwrap().state_lookups
    }

    /// Slots of the blocks successfully returned by `block`, in lookup order.
    pub fn visited_slots(&self) -> Vec<u64> {
        self.data.lock().unwrap().visited_slots.clone()
    }

    pub fn update_requests(&self) -> Vec<(u64, u64)> {
        self.data.lock().unwrap().update_requests.clone()
    }

    pub fn remove_block(&self, slot: u64) {
        let root = self.root_at(slot);
        self.data.lock().unwrap().blocks.remove(&root);
    }

    pub fn fail_block(&self, slot: u64) {
        let root = self.root_at(slot);
        self.data.lock().unwrap().failing_blocks.insert(root);
    }

    pub fn strip_sync_aggregate(&self, slot: u64) {
        let root = self.root_at(slot);
        let mut data = self.data.lock().unwrap();
        let mut block = data.blocks[&root].as_ref().clone();
        block.sync_aggregate = None;
        data.blocks.insert(root, Arc::new(block));
        data.participants.insert(slot, 0);
    }

    pub fn fail_state(&self, slot: u64) {
        self.data.lock().unwrap().failing_states.insert(slot);
    }

    pub fn fail_head_state(&self) {
        self.data.lock().unwrap().head_state_fails = true;
    }

    pub fn fail_state_root(&self) {
        let head_slot = self.head_slot();
        self.update_state(head_slot, |state| state.fail_hash = true);
    }

    /// Fills in the head state's latest block header, as after processing the next slot, and
    /// gives the state a live root that differs from the one recorded in the header.
    pub fn seal_head_header(&self, live_state_root: B256) {
        let head_slot = self.head_slot();
        self.update_state(head_slot, |state| {
            state.latest_block_header.state_root = state_root_for(head_slot);
            state.state_root = live_state_root;
        });
    }

    pub fn set_fork(&self, slot: u64, fork_name: ForkName) {
        self.update_state(slot, |state| state.fork_name = fork_name);
    }

    pub fn set_finalized_checkpoint(&self, slot: u64, checkpoint: Option<Checkpoint>) {
        self.update_state(slot, |state| state.finalized_checkpoint = checkpoint);
    }

    pub fn insert_update(&self, period: u64, update: LightClientUpdate) {
        self.data.lock().unwrap().updates.insert(period, update);
    }

    pub fn fail_updates(&self) {
        self.data.lock().unwrap().updates_fail = true;
    }

    fn update_state(&self, slot: u64, change: impl FnOnce(&mut MockState)) {
        let mut data = self.data.lock().unwrap();
        let mut state = data.states[&slot].as_ref().clone();
        change(&mut state);
        data.states.insert(slot, Arc::new(state));
    }
}

#[async_trait]
impl BlockProvider for MockChain {
    type Block = MockBlock;

    async fn block(&self, root: B256) -> Result<Option<Arc<MockBlock>>> {
        let mut data = self.data.lock().unwrap();
        data.block_lookups += 1;
        if data.failing_blocks.contains(&root) {
            bail!("block storage unavailable");
        }
        let block = data.blocks.get(&root).cloned();
        if let Some(block) = &block {
            data.visited_slots.push(block.slot);
        }
        Ok(block)
    }
}

#[async_trait]
impl StateProvider for MockChain {
    type State = MockState;

    async fn state_by_slot(&self, slot: u64) -> Result<Arc<MockState>> {
        let mut data = self.data.lock().unwrap();
        data.state_lookups += 1;
        if data.failing_states.contains(&slot) {
            bail!("state storage unavailable");
        }
        data.states
            .get(&slot)
            .cloned()
            .ok_or_else(|| anyhow!("no state at slot {slot}"))
    }

    async fn head_state(&self) -> Result<Arc<MockState>> {
        let mut data = self.data.lock().unwrap();
        data.state_lookups += 1;
        if data.head_state_fails {
            bail!("head state unavailable");
        }
        data.states
            .get(&data.head_slot)
            .cloned()
            .ok_or_else(|| anyhow!("empty chain"))
    }
}

impl ChainInfo for MockChain {
    fn current_slot(&self) -> u64 {
        self.head_slot() + 1
    }
}

#[async_trait]
impl UpdateStore for MockChain {
    async fn light_client_updates(
        &self,
        start_period: u64,
        end_period: u64,
    ) -> Result<BTreeMap<u64, LightClientUpdate>> {
        let mut data = self.data.lock().unwrap();
        data.update_requests.push((start_period, end_period));
        if data.updates_fail {
            bail!("update storage unavailable");
        }
        Ok(data
            .updates
            .range(start_period..=end_period)
            .map(|(period, update)| (*period, update.clone()))
            .collect())
    }
}

pub fn bootstrap_at(fork_name: ForkName, slot: u64) -> LightClientBootstrap {
    let beacon = BeaconBlockHeader {
        slot,
        ..Default::default()
    };
    match fork_name {
        ForkName::Bellatrix => {
            let mut bootstrap = LightClientBootstrapBellatrix::default();
            bootstrap.header.beacon = beacon;
            LightClientBootstrap::Bellatrix(bootstrap)
        }
        ForkName::Capella => {
            let mut bootstrap = LightClientBootstrapCapella::default();
            bootstrap.header.beacon = beacon;
            LightClientBootstrap::Capella(bootstrap)
        }
        ForkName::Deneb => {
            let mut bootstrap = LightClientBootstrapDeneb::default();
            bootstrap.header.beacon = beacon;
            LightClientBootstrap::Deneb(bootstrap)
        }
        ForkName::Electra => {
            let mut bootstrap = LightClientBootstrapElectra::default();
            bootstrap.header.beacon = beacon;
            LightClientBootstrap::Electra(bootstrap)
        }
    }
}

pub fn update_at(fork_name: ForkName, attested_slot: u64) -> LightClientUpdate {
    let beacon = BeaconBlockHeader {
        slot: attested_slot,
        ..Default::default()
    };
    match fork_name {
        ForkName::Bellatrix => {
            let mut update = LightClientUpdateBellatrix::default();
            update.attested_header.beacon = beacon;
            LightClientUpdate::Bellatrix(update)
        }
        ForkName::Capella => {
            let mut update = LightClientUpdateCapella::default();
            update.attested_header.beacon = beacon;
            LightClientUpdate::Capella(update)
        }
        ForkName::Deneb => {
            let mut update = LightClientUpdateDeneb::default();
            update.attested_header.beacon = beacon;
            LightClientUpdate::Deneb(update)
        }
        ForkName::Electra => {
            let mut update = LightClientUpdateElectra::default();
            update.attested_header.beacon = beacon;
            LightClientUpdate::Electra(update)
        }
    }
}

pub fn finality_update_at(
    fork_name: ForkName,
    attested_slot: u64,
    finalized_slot: u64,
    signature_slot: u64,
) -> LightClientFinalityUpdate {
    let attested = BeaconBlockHeader {
        slot: attested_slot,
        ..Default::default()
    };
    let finalized = BeaconBlockHeader {
        slot: finalized_slot,
        ..Default::default()
    };
    match fork_name {
        ForkName::Bellatrix => {
            let mut update = LightClientFinalityUpdateBellatrix {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            update.finalized_header.beacon = finalized;
            LightClientFinalityUpdate::Bellatrix(update)
        }
        ForkName::Capella => {
            let mut update = LightClientFinalityUpdateCapella {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            update.finalized_header.beacon = finalized;
            LightClientFinalityUpdate::Capella(update)
        }
        ForkName::Deneb => {
            let mut update = LightClientFinalityUpdateDeneb {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            update.finalized_header.beacon = finalized;
            LightClientFinalityUpdate::Deneb(update)
        }
        ForkName::Electra => {
            let mut update = LightClientFinalityUpdateElectra {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            update.finalized_header.beacon = finalized;
            LightClientFinalityUpdate::Electra(update)
        }
    }
}

pub fn optimistic_update_at(
    fork_name: ForkName,
    attested_slot: u64,
    signature_slot: u64,
) -> LightClientOptimisticUpdate {
    let attested = BeaconBlockHeader {
        slot: attested_slot,
        ..Default::default()
    };
    match fork_name {
        ForkName::Bellatrix => {
            let mut update = LightClientOptimisticUpdateBellatrix {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            LightClientOptimisticUpdate::Bellatrix(update)
        }
        ForkName::Capella => {
            let mut update = LightClientOptimisticUpdateCapella {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            LightClientOptimisticUpdate::Capella(update)
        }
        ForkName::Deneb => {
            let mut update = LightClientOptimisticUpdateDeneb {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            LightClientOptimisticUpdate::Deneb(update)
        }
        ForkName::Electra => {
            let mut update = LightClientOptimisticUpdateElectra {
                signature_slot,
                ..Default::default()
            };
            update.attested_header.beacon = attested;
            LightClientOptimisticUpdate::Electra(update)
        }
    }
}

/// Slots of the chain objects a builder call received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderCall {
    Bootstrap {
        current_slot: u64,
        state_slot: u64,
        block_slot: u64,
    },
    FinalityUpdate {
        state_slot: u64,
        block_slot: u64,
        attested_state_slot: u64,
        attested_block_slot: u64,
        finalized_block_slot: u64,
    },
    OptimisticUpdate {
        state_slot: u64,
        block_slot: u64,
        attested_state_slot: u64,
        attested_block_slot: u64,
    },
}

/// Builder producing placeholder payloads on the fork of the state it is given, unless a
/// fork is forced with [`MockBuilder::build_on`].
#[derive(Default)]
pub struct MockBuilder {
    calls: Mutex<Vec<BuilderCall>>,
    fail: Mutex<bool>,
    fork_name: Mutex<Option<ForkName>>,
}

impl MockBuilder {
    pub fn calls(&self) -> Vec<BuilderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// Builds every payload on `fork_name`, as a builder crossing a fork boundary would.
    pub fn build_on(&self, fork_name: ForkName) {
        *self.fork_name.lock().unwrap() = Some(fork_name);
    }

    fn fork_for(&self, state: &MockState) -> ForkName {
        self.fork_name.lock().unwrap().unwrap_or(state.fork_name)
    }

    fn record(&self, call: BuilderCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail.lock().unwrap() {
            bail!("merkle proof construction failed");
        }
        Ok(())
    }
}

impl LightClientBuilder<MockBlock, MockState> for MockBuilder {
    fn bootstrap(
        &self,
        current_slot: u64,
        state: &MockState,
        block: &MockBlock,
    ) -> Result<LightClientBootstrap> {
        self.record(BuilderCall::Bootstrap {
            current_slot,
            state_slot: state.slot,
            block_slot: block.slot,
        })?;
        Ok(bootstrap_at(self.fork_for(state), block.slot))
    }

    fn finality_update(
        &self,
        _current_slot: u64,
        state: &MockState,
        block: &MockBlock,
        attested_state: &MockState,
        attested_block: &MockBlock,
        finalized_block: &MockBlock,
    ) -> Result<LightClientFinalityUpdate> {
        self.record(BuilderCall::FinalityUpdate {
            state_slot: state.slot,
            block_slot: block.slot,
            attested_state_slot: attested_state.slot,
            attested_block_slot: attested_block.slot,
            finalized_block_slot: finalized_block.slot,
        })?;
        Ok(finality_update_at(
            self.fork_for(attested_state),
            attested_block.slot,
            finalized_block.slot,
            block.slot,
        ))
    }

    fn optimistic_update(
        &self,
        _current_slot: u64,
        state: &MockState,
        block: &MockBlock,
        attested_state: &MockState,
        attested_block: &MockBlock,
    ) -> Result<LightClientOptimisticUpdate> {
        self.record(BuilderCall::OptimisticUpdate {
            state_slot: state.slot,
            block_slot: block.slot,
            attested_state_slot: attested_state.slot,
            attested_block_slot: attested_block.slot,
        })?;
        Ok(optimistic_update_at(
            self.fork_for(attested_state),
            attested_block.slot,
            block.slot,
        ))
    }
}

pub fn mock_providers(
    chain: Arc<MockChain>,
    builder: Arc<MockBuilder>,
) -> LightClientProviders<MockBlock, MockState> {
    LightClientProviders {
        blocks: chain.clone(),
        states: chain.clone(),
        chain_info: chain.clone(),
        updates: chain,
        builder,
    }
}

pub fn mock_api(
    config: LightClientConfig,
    chain: Arc<MockChain>,
    builder: Arc<MockBuilder>,
) -> LightClientApi<MockBlock, MockState> {
    LightClientApi::new(config, mock_providers(chain, builder))
}

pub fn enabled_config() -> LightClientConfig {
    LightClientConfig {
        enabled: true,
        ..Default::default()
    }
}
