use serde::{Deserialize, Deserializer, Serialize};
use ssz::Decode;
use ssz_derive::{Decode, Encode};
use superstruct::superstruct;
use tree_hash_derive::TreeHash;

use crate::{
    consensus::{fork::ForkName, header::BeaconBlockHeader, sync_aggregate::SyncAggregate},
    light_client::header::{
        LightClientHeaderBellatrix, LightClientHeaderCapella, LightClientHeaderDeneb,
        LightClientHeaderElectra,
    },
    versioned::{ForkVersionDeserialize, ForkVersioned},
};

/// A LightClientOptimisticUpdate is the update we send on each slot,
/// it is based off the current unfinalized epoch it is verified only against BLS signature.
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
pub struct LightClientOptimisticUpdate {
    /// Header attested to by the sync committee
    #[superstruct(only(Bellatrix), partial_getter(rename = "attested_header_bellatrix"))]
    pub attested_header: LightClientHeaderBellatrix,
    #[superstruct(only(Capella), partial_getter(rename = "attested_header_capella"))]
    pub attested_header: LightClientHeaderCapella,
    #[superstruct(only(Deneb), partial_getter(rename = "attested_header_deneb"))]
    pub attested_header: LightClientHeaderDeneb,
    #[superstruct(only(Electra), partial_getter(rename = "attested_header_electra"))]
    pub attested_header: LightClientHeaderElectra,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Slot at which the aggregate signature was created (untrusted)
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub signature_slot: u64,
}

impl LightClientOptimisticUpdate {
    pub fn from_ssz_bytes(bytes: &[u8], fork_name: ForkName) -> Result<Self, ssz::DecodeError> {
        match fork_name {
            ForkName::Bellatrix => {
                LightClientOptimisticUpdateBellatrix::from_ssz_bytes(bytes).map(Self::Bellatrix)
            }
            ForkName::Capella => {
                LightClientOptimisticUpdateCapella::from_ssz_bytes(bytes).map(Self::Capella)
            }
            ForkName::Deneb => {
                LightClientOptimisticUpdateDeneb::from_ssz_bytes(bytes).map(Self::Deneb)
            }
            ForkName::Electra => {
                LightClientOptimisticUpdateElectra::from_ssz_bytes(bytes).map(Self::Electra)
            }
        }
    }

    pub fn attested_beacon_block_header(&self) -> &BeaconBlockHeader {
        match self {
            Self::Bellatrix(update) => &update.attested_header.beacon,
            Self::Capella(update) => &update.attested_header.beacon,
            Self::Deneb(update) => &update.attested_header.beacon,
            Self::Electra(update) => &update.attested_header.beacon,
        }
    }
}

impl ForkVersioned for LightClientOptimisticUpdate {
    fn fork_name(&self) -> ForkName {
        match self {
            Self::Bellatrix(_) => ForkName::Bellatrix,
            Self::Capella(_) => ForkName::Capella,
            Self::Deneb(_) => ForkName::Deneb,
            Self::Electra(_) => ForkName::Electra,
        }
    }
}

impl ForkVersionDeserialize for LightClientOptimisticUpdate {
    fn deserialize_by_fork<'de, D: Deserializer<'de>>(
        deserializer: D,
        fork_name: ForkName,
    ) -> Result<Self, D::Error> {
        Ok(match fork_name {
            ForkName::Bellatrix => {
                Self::Bellatrix(LightClientOptimisticUpdateBellatrix::deserialize(deserializer)?)
            }
            ForkName::Capella => {
                Self::Capella(LightClientOptimisticUpdateCapella::deserialize(deserializer)?)
            }
            ForkName::Deneb => {
                Self::Deneb(LightClientOptimisticUpdateDeneb::deserialize(deserializer)?)
            }
            ForkName::Electra => {
                Self::Electra(LightClientOptimisticUpdateElectra::deserialize(deserializer)?)
            }
        })
    }
}
