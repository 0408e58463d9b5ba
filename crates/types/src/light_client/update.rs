use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize};
use ssz::Decode;
use ssz_derive::{Decode, Encode};
use ssz_types::{
    typenum::{U5, U6, U7},
    FixedVector,
};
use superstruct::superstruct;
use tree_hash_derive::TreeHash;

use crate::{
    consensus::{
        constants::{EPOCHS_PER_SYNC_COMMITTEE_PERIOD, SLOTS_PER_EPOCH},
        fork::ForkName,
        header::BeaconBlockHeader,
        sync_aggregate::SyncAggregate,
        sync_committee::SyncCommittee,
    },
    light_client::header::{
        LightClientHeaderBellatrix, LightClientHeaderCapella, LightClientHeaderDeneb,
        LightClientHeaderElectra,
    },
    versioned::{ForkVersionDeserialize, ForkVersioned},
};

pub type NextSyncCommitteeProofLen = U5;
pub type NextSyncCommitteeProofLenElectra = U6;
pub type FinalizedRootProofLen = U6;
pub type FinalizedRootProofLenElectra = U7;

/// A LightClientUpdate is the update we request solely to either complete the bootstrapping
/// process, or to sync up to the sync committee period of the finalized header.
#[superstruct(
    variants(Bellatrix, Capella, Deneb, Electra),
    variant_attributes(
        derive(
            Debug,
            Clone,
            PartialEq,
            Serialize,
            Deserialize,
            Encode,
            Decode,
            Default,
            TreeHash
        ),
        serde(deny_unknown_fields),
    )
)]
#[derive(Debug, Clone, PartialEq, Serialize, Encode)]
#[serde(untagged)]
#[ssz(enum_behaviour = "transparent")]
pub struct LightClientUpdate {
    /// The last `BeaconBlockHeader` from the last attested block by the sync committee.
    #[superstruct(only(Bellatrix), partial_getter(rename = "attested_header_bellatrix"))]
    pub attested_header: LightClientHeaderBellatrix,
    #[superstruct(only(Capella), partial_getter(rename = "attested_header_capella"))]
    pub attested_header: LightClientHeaderCapella,
    #[superstruct(only(Deneb), partial_getter(rename = "attested_header_deneb"))]
    pub attested_header: LightClientHeaderDeneb,
    #[superstruct(only(Electra), partial_getter(rename = "attested_header_electra"))]
    pub attested_header: LightClientHeaderElectra,
    /// The `SyncCommittee` used in the next period.
    pub next_sync_committee: SyncCommittee,
    /// Merkle proof for next sync committee
    #[superstruct(
        only(Bellatrix, Capella, Deneb),
        partial_getter(rename = "next_sync_committee_branch_base")
    )]
    pub next_sync_committee_branch: FixedVector<B256, NextSyncCommitteeProofLen>,
    #[superstruct(
        only(Electra),
        partial_getter(rename = "next_sync_committee_branch_electra")
    )]
    pub next_sync_committee_branch: FixedVector<B256, NextSyncCommitteeProofLenElectra>,
    /// The last `BeaconBlockHeader` from the last attested finalized block (end of epoch).
    #[superstruct(only(Bellatrix), partial_getter(rename = "finalized_header_bellatrix"))]
    pub finalized_header: LightClientHeaderBellatrix,
    #[superstruct(only(Capella), partial_getter(rename = "finalized_header_capella"))]
    pub finalized_header: LightClientHeaderCapella,
    #[superstruct(only(Deneb), partial_getter(rename = "finalized_header_deneb"))]
    pub finalized_header: LightClientHeaderDeneb,
    #[superstruct(only(Electra), partial_getter(rename = "finalized_header_electra"))]
    pub finalized_header: LightClientHeaderElectra,
    /// Merkle proof attesting finalized header.
    #[superstruct(
        only(Bellatrix, Capella, Deneb),
        partial_getter(rename = "finality_branch_base")
    )]
    pub finality_branch: FixedVector<B256, FinalizedRootProofLen>,
    #[superstruct(only(Electra), partial_getter(rename = "finality_branch_electra"))]
    pub finality_branch: FixedVector<B256, FinalizedRootProofLenElectra>,
    /// current sync aggregate
    pub sync_aggregate: SyncAggregate,
    /// Slot of the sync aggregated signature
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub signature_slot: u64,
}

impl LightClientUpdate {
    pub fn from_ssz_bytes(bytes: &[u8], fork_name: ForkName) -> Result<Self, ssz::DecodeError> {
        match fork_name {
            ForkName::Bellatrix => {
                LightClientUpdateBellatrix::from_ssz_bytes(bytes).map(Self::Bellatrix)
            }
            ForkName::Capella => LightClientUpdateCapella::from_ssz_bytes(bytes).map(Self::Capella),
            ForkName::Deneb => LightClientUpdateDeneb::from_ssz_bytes(bytes).map(Self::Deneb),
            ForkName::Electra => LightClientUpdateElectra::from_ssz_bytes(bytes).map(Self::Electra),
        }
    }

    pub fn attested_beacon_header(&self) -> &BeaconBlockHeader {
        match self {
            Self::Bellatrix(update) => &update.attested_header.beacon,
            Self::Capella(update) => &update.attested_header.beacon,
            Self::Deneb(update) => &update.attested_header.beacon,
            Self::Electra(update) => &update.attested_header.beacon,
        }
    }

    /// Sync committee period of the attested header.
    pub fn sync_committee_period(&self) -> u64 {
        self.attested_beacon_header().slot / (SLOTS_PER_EPOCH * EPOCHS_PER_SYNC_COMMITTEE_PERIOD)
    }
}

impl ForkVersioned for LightClientUpdate {
    fn fork_name(&self) -> ForkName {
        match self {
            Self::Bellatrix(_) => ForkName::Bellatrix,
            Self::Capella(_) => ForkName::Capella,
            Self::Deneb(_) => ForkName::Deneb,
            Self::Electra(_) => ForkName::Electra,
        }
    }
}

impl ForkVersionDeserialize for LightClientUpdate {
    fn deserialize_by_fork<'de, D: Deserializer<'de>>(
        deserializer: D,
        fork_name: ForkName,
    ) -> Result<Self, D::Error> {
        Ok(match fork_name {
            ForkName::Bellatrix => {
                Self::Bellatrix(LightClientUpdateBellatrix::deserialize(deserializer)?)
            }
            ForkName::Capella => Self::Capella(LightClientUpdateCapella::deserialize(deserializer)?),
            ForkName::Deneb => Self::Deneb(LightClientUpdateDeneb::deserialize(deserializer)?),
            ForkName::Electra => Self::Electra(LightClientUpdateElectra::deserialize(deserializer)?),
        })
    }
}
