use std::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error thrown when failed to parse a valid [`ForkName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fork name: {0}")]
pub struct ParseForkNameError(String);

/// Consensus forks that carry light client data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ForkName {
    Bellatrix,
    Capella,
    Deneb,
    Electra,
}

impl ForkName {
    pub fn as_capitalized_str(&self) -> &'static str {
        match self {
            ForkName::Bellatrix => "Bellatrix",
            ForkName::Capella => "Capella",
            ForkName::Deneb => "Deneb",
            ForkName::Electra => "Electra",
        }
    }

    /// Lowercase name, as carried by the `Eth-Consensus-Version` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForkName::Bellatrix => "bellatrix",
            ForkName::Capella => "capella",
            ForkName::Deneb => "deneb",
            ForkName::Electra => "electra",
        }
    }
}

impl FromStr for ForkName {
    type Err = ParseForkNameError;

    fn from_str(fork_name: &str) -> Result<Self, Self::Err> {
        Ok(match fork_name.to_lowercase().as_ref() {
            "bellatrix" | "merge" => ForkName::Bellatrix,
            "capella" => ForkName::Capella,
            "deneb" => ForkName::Deneb,
            "electra" => ForkName::Electra,
            _ => return Err(ParseForkNameError(fork_name.to_string())),
        })
    }
}

impl Display for ForkName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        self.as_str().fmt(f)
    }
}

impl From<ForkName> for String {
    fn from(fork: ForkName) -> String {
        fork.to_string()
    }
}

impl TryFrom<String> for ForkName {
    type Error = ParseForkNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}
