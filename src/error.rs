#![allow(dead_code)]

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RollupError {
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
    #[error("category metadata invalid: {0}")]
    InvalidMetadata(String),
    #[error("day entries invalid: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarnCode {
    W001DateUnresolved,
    W002DurationMalformed,
    W003TagAmbiguous,
    W004TagStoreUnreadable,
}

impl WarnCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W001DateUnresolved => "W001_DATE_UNRESOLVED",
            Self::W002DurationMalformed => "W002_DURATION_MALFORMED",
            Self::W003TagAmbiguous => "W003_TAG_AMBIGUOUS",
            Self::W004TagStoreUnreadable => "W004_TAG_STORE_UNREADABLE",
        }
    }
}

impl Serialize for WarnCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
