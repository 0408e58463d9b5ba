use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use ssz::Decode;
use ssz_derive::{Decode, Encode};
use ssz_types::{
    serde_utils::{hex_fixed_vec, hex_var_list},
    typenum, FixedVector, VariableList,
};
use superstruct::superstruct;
use tree_hash_derive::TreeHash;

use crate::consensus::{fork::ForkName, serde::quoted_u256};

pub type Bloom = FixedVector<u8, typenum::U256>;
pub type ExtraData = VariableList<u8, typenum::U32>;

/// Execution block summary embedded in light client headers from Capella on.
///
/// Electra did not change this container, so Electra headers carry the Deneb variant.
#[superstruct(
    variants(Capella, Deneb),
    variant_attributes(derive(
        Default,
        Debug,
        Clone,
        PartialEq,
        Serialize,
        Deserialize,
        Encode,
        Decode,
        TreeHash
    ),)
)]
#[derive(Debug, Clone, PartialEq, Serialize, Encode, TreeHash)]
#[serde(untagged)]
#[ssz(enum_behaviour = "transparent")]
#[tree_hash(enum_behaviour = "transparent")]
pub struct ExecutionPayloadHeader {
    #[superstruct(getter(copy))]
    pub parent_hash: B256,
    #[superstruct(getter(copy))]
    pub fee_recipient: Address,
    #[superstruct(getter(copy))]
    pub state_root: B256,
    #[superstruct(getter(copy))]
    pub receipts_root: B256,
    #[serde(with = "hex_fixed_vec")]
    pub logs_bloom: Bloom,
    #[superstruct(getter(copy))]
    pub prev_randao: B256,
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub block_number: u64,
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub gas_limit: u64,
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub gas_used: u64,
    #[superstruct(getter(copy))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub timestamp: u64,
    #[serde(with = "hex_var_list")]
    pub extra_data: ExtraData,
    #[superstruct(getter(copy))]
    #[serde(with = "quoted_u256")]
    pub base_fee_per_gas: U256,
    #[superstruct(getter(copy))]
    pub block_hash: B256,
    #[superstruct(getter(copy))]
    pub transactions_root: B256,
    #[superstruct(getter(copy))]
    pub withdrawals_root: B256,
    #[superstruct(only(Deneb))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub blob_gas_used: u64,
    #[superstruct(only(Deneb))]
    #[serde(with = "serde_utils::quoted_u64")]
    pub excess_blob_gas: u64,
}

impl ExecutionPayloadHeader {
    pub fn from_ssz_bytes(bytes: &[u8], fork_name: ForkName) -> Result<Self, ssz::DecodeError> {
        match fork_name {
            ForkName::Bellatrix => Err(ssz::DecodeError::BytesInvalid(
                "bellatrix light client headers carry no execution payload".to_string(),
            )),
            ForkName::Capella => {
                ExecutionPayloadHeaderCapella::from_ssz_bytes(bytes).map(Self::Capella)
            }
            ForkName::Deneb | ForkName::Electra => {
                ExecutionPayloadHeaderDeneb::from_ssz_bytes(bytes).map(Self::Deneb)
            }
        }
    }
}
