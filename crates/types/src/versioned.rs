use serde::{Deserialize, Deserializer, Serialize};

use crate::consensus::fork::ForkName;

/// Payloads whose encoding depends on the fork they were produced under.
pub trait ForkVersioned {
    fn fork_name(&self) -> ForkName;
}

/// Deserialization of fork-versioned payloads, where the variant is picked by an
/// externally supplied fork name rather than by the data itself.
pub trait ForkVersionDeserialize: Sized {
    fn deserialize_by_fork<'de, D: Deserializer<'de>>(
        deserializer: D,
        fork_name: ForkName,
    ) -> Result<Self, D::Error>;
}

/// JSON envelope used by the light client endpoints: `{"version": <fork>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForkVersionedResponse<T> {
    pub version: ForkName,
    pub data: T,
}

impl<T: ForkVersioned> ForkVersionedResponse<T> {
    /// Wraps a payload, labelling it with the fork it was built for.
    pub fn new(data: T) -> Self {
        Self {
            version: data.fork_name(),
            data,
        }
    }
}

impl<'de, T: ForkVersionDeserialize> Deserialize<'de> for ForkVersionedResponse<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            version: ForkName,
            data: serde_json::Value,
        }

        let helper = Helper::deserialize(deserializer)?;
        let data = T::deserialize_by_fork(helper.data, helper.version)
            .map_err(serde::de::Error::custom)?;
        Ok(Self {
            version: helper.version,
            data,
        })
    }
}
