use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize};
use ssz::Decode;
use ssz_derive::{Decode, Encode};
use ssz_types::{
    typenum::{U5, U6},
    FixedVector,
};
use superstruct::superstruct;
use tree_hash_derive::TreeHash;

use crate::{
    consensus::{fork::ForkName, header::BeaconBlockHeader, sync_committee::SyncCommittee},
    light_client::header::{
        LightClientHeaderBellatrix, LightClientHeaderCapella, LightClientHeaderDeneb,
        LightClientHeaderElectra,
    },
    versioned::{ForkVersionDeserialize, ForkVersioned},
};

pub type CurrentSyncCommitteeProofLen = U5;
pub type CurrentSyncCommitteeProofLenElectra = U6;

/// `LightClientBootstrap` object for the configured trusted block root.
/// The bootstrap object is used to generate a local `LightClientStore`.
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
pub struct LightClientBootstrap {
    /// Header matching the requested beacon block root
    #[superstruct(only(Bellatrix), partial_getter(rename = "header_bellatrix"))]
    pub header: LightClientHeaderBellatrix,
    #[superstruct(only(Capella), partial_getter(rename = "header_capella"))]
    pub header: LightClientHeaderCapella,
    #[superstruct(only(Deneb), partial_getter(rename = "header_deneb"))]
    pub header: LightClientHeaderDeneb,
    #[superstruct(only(Electra), partial_getter(rename = "header_electra"))]
    pub header: LightClientHeaderElectra,
    /// The `SyncCommittee` used in the requested period.
    pub current_sync_committee: SyncCommittee,
    /// Merkle proof for sync committee
    #[superstruct(
        only(Bellatrix, Capella, Deneb),
        partial_getter(rename = "current_sync_committee_branch_base")
    )]
    pub current_sync_committee_branch: FixedVector<B256, CurrentSyncCommitteeProofLen>,
    #[superstruct(
        only(Electra),
        partial_getter(rename = "current_sync_committee_branch_electra")
    )]
    pub current_sync_committee_branch: FixedVector<B256, CurrentSyncCommitteeProofLenElectra>,
}

impl LightClientBootstrap {
    pub fn from_ssz_bytes(bytes: &[u8], fork_name: ForkName) -> Result<Self, ssz::DecodeError> {
        match fork_name {
            ForkName::Bellatrix => {
                LightClientBootstrapBellatrix::from_ssz_bytes(bytes).map(Self::Bellatrix)
            }
            ForkName::Capella => {
                LightClientBootstrapCapella::from_ssz_bytes(bytes).map(Self::Capella)
            }
            ForkName::Deneb => LightClientBootstrapDeneb::from_ssz_bytes(bytes).map(Self::Deneb),
            ForkName::Electra => {
                LightClientBootstrapElectra::from_ssz_bytes(bytes).map(Self::Electra)
            }
        }
    }

    pub fn beacon_header(&self) -> &BeaconBlockHeader {
        match self {
            Self::Bellatrix(bootstrap) => &bootstrap.header.beacon,
            Self::Capella(bootstrap) => &bootstrap.header.beacon,
            Self::Deneb(bootstrap) => &bootstrap.header.beacon,
            Self::Electra(bootstrap) => &bootstrap.header.beacon,
        }
    }
}

impl ForkVersioned for LightClientBootstrap {
    fn fork_name(&self) -> ForkName {
        match self {
            Self::Bellatrix(_) => ForkName::Bellatrix,
            Self::Capella(_) => ForkName::Capella,
            Self::Deneb(_) => ForkName::Deneb,
            Self::Electra(_) => ForkName::Electra,
        }
    }
}

impl ForkVersionDeserialize for LightClientBootstrap {
    fn deserialize_by_fork<'de, D: Deserializer<'de>>(
        deserializer: D,
        fork_name: ForkName,
    ) -> Result<Self, D::Error> {
        Ok(match fork_name {
            ForkName::Bellatrix => {
                Self::Bellatrix(LightClientBootstrapBellatrix::deserialize(deserializer)?)
            }
            ForkName::Capella => {
                Self::Capella(LightClientBootstrapCapella::deserialize(deserializer)?)
            }
            ForkName::Deneb => Self::Deneb(LightClientBootstrapDeneb::deserialize(deserializer)?),
            ForkName::Electra => {
                Self::Electra(LightClientBootstrapElectra::deserialize(deserializer)?)
            }
        })
    }
}
