use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{typenum::U512, BitVector};
use tree_hash_derive::TreeHash;

use crate::consensus::bytes::BlsSignature;

pub type SyncCommitteeBits = BitVector<U512>;

/// https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/beacon-chain.md#syncaggregate
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncAggregate {
    pub sync_committee_bits: SyncCommitteeBits,
    pub sync_committee_signature: BlsSignature,
}

impl SyncAggregate {
    /// Number of sync committee members whose signature is included.
    pub fn num_participants(&self) -> u64 {
        self.sync_committee_bits.num_set_bits() as u64
    }
}

impl Default for SyncAggregate {
    fn default() -> Self {
        Self {
            sync_committee_bits: BitVector::new(),
            sync_committee_signature: BlsSignature::default(),
        }
    }
}
