use std::sync::Arc;

use alloy_primitives::B256;
use lc_types::{
    light_client::{
        LightClientBootstrap, LightClientFinalityUpdate, LightClientOptimisticUpdate,
        LightClientUpdate,
    },
    ForkVersionedResponse,
};
use tracing::{debug, instrument};

use crate::{
    config::LightClientConfig,
    errors::LightClientApiError,
    provider::{BeaconBlockView, BeaconStateView, LightClientProviders},
    range::{assemble_contiguous_range, PeriodRange},
    selector::find_suitable_block,
};

/// A sufficiently signed block together with its parent, the block the signatures attest to.
struct AttestedChain<B, S> {
    block: Arc<B>,
    state: Arc<S>,
    attested_block: Arc<B>,
    attested_state: Arc<S>,
}

/// The four light client flows, assembled from the node's chain storage.
pub struct LightClientApi<B, S>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    config: LightClientConfig,
    providers: LightClientProviders<B, S>,
}

impl<B, S> LightClientApi<B, S>
where
    B: BeaconBlockView + 'static,
    S: BeaconStateView + 'static,
{
    pub fn new(config: LightClientConfig, providers: LightClientProviders<B, S>) -> Self {
        Self { config, providers }
    }

    pub fn config(&self) -> &LightClientConfig {
        &self.config
    }

    pub fn ensure_enabled(&self) -> Result<(), LightClientApiError> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(LightClientApiError::disabled())
        }
    }

    /// Bootstrap anchored at the block with root `block_root`.
    #[instrument(name = "light_client.bootstrap", skip(self))]
    pub async fn bootstrap(
        &self,
        block_root: B256,
    ) -> Result<ForkVersionedResponse<LightClientBootstrap>, LightClientApiError> {
        self.ensure_enabled()?;

        let block = match self.providers.blocks.block(block_root).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                return Err(LightClientApiError::NotFound(format!(
                    "could not find block with root {block_root}"
                )))
            }
            Err(err) => return Err(LightClientApiError::internal("could not get block", err)),
        };
        let state = self
            .providers
            .states
            .state_by_slot(block.slot())
            .await
            .map_err(|err| LightClientApiError::internal("could not get state", err))?;

        let current_slot = self.providers.chain_info.current_slot();
        let bootstrap = self
            .providers
            .builder
            .bootstrap(current_slot, &state, &block)
            .map_err(|err| {
                LightClientApiError::internal("could not create light client bootstrap", err)
            })?;
        Ok(ForkVersionedResponse::new(bootstrap))
    }

    /// Stored best updates for `count` periods from `start_period`, cut at the first missing
    /// period.
    #[instrument(name = "light_client.updates", skip(self))]
    pub async fn updates_by_range(
        &self,
        start_period: u64,
        count: u64,
    ) -> Result<Vec<ForkVersionedResponse<LightClientUpdate>>, LightClientApiError> {
        self.ensure_enabled()?;

        let range = PeriodRange::new(start_period, count, self.config.max_request_updates)?;
        let stored = self
            .providers
            .updates
            .light_client_updates(range.start_period, range.end_period())
            .await
            .map_err(|err| {
                LightClientApiError::internal("could not get light client updates from DB", err)
            })?;

        let updates = assemble_contiguous_range(stored, range.start_period, range.count);
        debug!(
            requested = range.count,
            returned = updates.len(),
            "Assembled light client updates"
        );
        Ok(updates
            .into_iter()
            .map(ForkVersionedResponse::new)
            .collect())
    }

    /// Finality update from the most recent block signed by a supermajority of the
    /// configured participant floor.
    #[instrument(name = "light_client.finality_update", skip(self))]
    pub async fn finality_update(
        &self,
    ) -> Result<ForkVersionedResponse<LightClientFinalityUpdate>, LightClientApiError> {
        self.ensure_enabled()?;

        let chain = self
            .attested_chain(self.config.finality_min_signatures())
            .await?;

        let checkpoint = chain.attested_state.finalized_checkpoint().ok_or_else(|| {
            LightClientApiError::Internal(
                "attested state does not have a finalized checkpoint".to_string(),
            )
        })?;
        let finalized_block = match self.providers.blocks.block(checkpoint.root).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                return Err(LightClientApiError::Internal(format!(
                    "could not find finalized block with root {}",
                    checkpoint.root
                )))
            }
            Err(err) => {
                return Err(LightClientApiError::internal(
                    "could not get finalized block",
                    err,
                ))
            }
        };

        let current_slot = self.providers.chain_info.current_slot();
        let update = self
            .providers
            .builder
            .finality_update(
                current_slot,
                &chain.state,
                &chain.block,
                &chain.attested_state,
                &chain.attested_block,
                &finalized_block,
            )
            .map_err(|err| {
                LightClientApiError::internal("could not create light client finality update", err)
            })?;
        Ok(ForkVersionedResponse::new(update))
    }

    /// Optimistic update from the most recent block meeting the configured participant floor.
    #[instrument(name = "light_client.optimistic_update", skip(self))]
    pub async fn optimistic_update(
        &self,
    ) -> Result<ForkVersionedResponse<LightClientOptimisticUpdate>, LightClientApiError> {
        self.ensure_enabled()?;

        let chain = self
            .attested_chain(self.config.optimistic_min_signatures())
            .await?;

        let current_slot = self.providers.chain_info.current_slot();
        let update = self
            .providers
            .builder
            .optimistic_update(
                current_slot,
                &chain.state,
                &chain.block,
                &chain.attested_state,
                &chain.attested_block,
            )
            .map_err(|err| {
                LightClientApiError::internal(
                    "could not create light client optimistic update",
                    err,
                )
            })?;
        Ok(ForkVersionedResponse::new(update))
    }

    async fn attested_chain(
        &self,
        min_signatures: u64,
    ) -> Result<AttestedChain<B, S>, LightClientApiError> {
        let block = find_suitable_block(
            self.providers.blocks.as_ref(),
            self.providers.states.as_ref(),
            min_signatures,
            self.config.max_walk_depth,
        )
        .await?;
        let state = self
            .providers
            .states
            .state_by_slot(block.slot())
            .await
            .map_err(|err| LightClientApiError::internal("could not get state", err))?;

        let attested_root = block.parent_root();
        let attested_block = match self.providers.blocks.block(attested_root).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                return Err(LightClientApiError::Internal(format!(
                    "could not find attested block with root {attested_root}"
                )))
            }
            Err(err) => {
                return Err(LightClientApiError::internal(
                    "could not get attested block",
                    err,
                ))
            }
        };
        let attested_state = self
            .providers
            .states
            .state_by_slot(attested_block.slot())
            .await
            .map_err(|err| LightClientApiError::internal("could not get attested state", err))?;

        Ok(AttestedChain {
            block,
            state,
            attested_block,
            attested_state,
        })
    }
}
