use std::sync::Arc;

use alloy_primitives::B256;
use tracing::debug;
use tree_hash::TreeHash;

use crate::{
    errors::LightClientApiError,
    provider::{BeaconBlockView, BeaconStateView, BlockProvider, StateProvider},
};

/// Walks back from the head block to the most recent block carrying at least
/// `min_signatures` sync committee signatures.
///
/// The head state's latest block header has an empty state root until the next slot is
/// processed, so the root of the head block is recomputed with the live state root filled in.
/// `max_walk_depth` bounds the number of parent hops; `None` walks until a block qualifies.
pub async fn find_suitable_block<B, S>(
    blocks: &dyn BlockProvider<Block = B>,
    states: &dyn StateProvider<State = S>,
    min_signatures: u64,
    max_walk_depth: Option<u64>,
) -> Result<Arc<B>, LightClientApiError>
where
    B: BeaconBlockView,
    S: BeaconStateView,
{
    let head_state = states
        .head_state()
        .await
        .map_err(|err| LightClientApiError::not_found("could not get head state", err))?;

    let mut header = head_state.latest_block_header().clone();
    if header.state_root == B256::ZERO {
        header.state_root = head_state.hash_tree_root().map_err(|err| {
            LightClientApiError::internal("could not compute head state root", err)
        })?;
    }

    let mut root = header.tree_hash_root();
    let mut depth = 0;
    loop {
        let block = match blocks.block(root).await {
            Ok(Some(block)) => block,
            Ok(None) => {
                return Err(LightClientApiError::NotFound(format!(
                    "could not find block with root {root}"
                )))
            }
            Err(err) => {
                return Err(LightClientApiError::not_found(
                    &format!("could not get block with root {root}"),
                    err,
                ))
            }
        };

        let participants = block.num_sync_committee_participants();
        if participants >= min_signatures {
            return Ok(block);
        }
        debug!(
            slot = block.slot(),
            participants, min_signatures, "Skipping block with too few sync committee signatures"
        );

        if max_walk_depth.is_some_and(|max| depth >= max) {
            return Err(LightClientApiError::NotFound(format!(
                "no block with at least {min_signatures} sync committee signatures within {depth} blocks of the head"
            )));
        }
        depth += 1;
        root = block.parent_root();
    }
}
