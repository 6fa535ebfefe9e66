use crate::model::TraversalLevel;
use serde::{Deserialize, Serialize};

/// Severity gate for `serialize_status` (§4.9, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warning
    }
}

/// Parameters for `serialize_status` (§6): how deep to walk, what
/// severities to include, and whether to emit HTML-friendly markup in
/// description fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerializationConfig {
    #[serde(default)]
    pub loglevel: LogLevel,
    pub level: SerializedLevel,
    #[serde(default)]
    pub html_format: bool,
}

/// Serializable mirror of `TraversalLevel` (the domain type carries no
/// serde impl since the engine never needs to deserialize a level, only
/// a config that names one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SerializedLevel {
    Delegation,
    SecureDelegation,
    NsTarget,
    AllSameName,
    All,
}

impl From<SerializedLevel> for TraversalLevel {
    fn from(l: SerializedLevel) -> Self {
        match l {
            SerializedLevel::Delegation => TraversalLevel::Delegation,
            SerializedLevel::SecureDelegation => TraversalLevel::SecureDelegation,
            SerializedLevel::NsTarget => TraversalLevel::NsTarget,
            SerializedLevel::AllSameName => TraversalLevel::AllSameName,
            SerializedLevel::All => TraversalLevel::All,
        }
    }
}
