//! Client configuration with TOML file support.

use std::path::Path;

use dirvote_types::Address;
use dirvote_typed_data::VotingDomain;
use dirvote_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the dirvote client.
///
/// Loaded from a TOML file via [`ClientConfig::from_toml_file`]; every key is
/// optional. Command-line flags override file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Vote topics are this string with the room number appended.
    #[serde(default = "default_vote_topic_base")]
    pub vote_topic_base: String,

    #[serde(default = "default_feature_topic")]
    pub feature_topic: String,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// The contract votes are signed for and submitted to.
    #[serde(default)]
    pub voting_contract: Address,

    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    #[serde(default = "default_domain_version")]
    pub domain_version: String,

    /// REST endpoint of a Waku node.
    #[serde(default = "default_waku_url")]
    pub waku_url: String,

    /// JSON-RPC endpoint of an external wallet. Unset means signing needs a
    /// local key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_vote_topic_base() -> String {
    "/dirvote/1/vote-room-".to_string()
}

fn default_feature_topic() -> String {
    "/dirvote/1/feature/proto".to_string()
}

fn default_chain_id() -> u64 {
    1
}

fn default_domain_name() -> String {
    VotingDomain::DEFAULT_NAME.to_string()
}

fn default_domain_version() -> String {
    VotingDomain::DEFAULT_VERSION.to_string()
}

fn default_waku_url() -> String {
    "http://127.0.0.1:8645".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The signing domain votes are built and verified under.
    pub fn voting_domain(&self) -> VotingDomain {
        VotingDomain {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.voting_contract,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            vote_topic_base: default_vote_topic_base(),
            feature_topic: default_feature_topic(),
            chain_id: default_chain_id(),
            voting_contract: Address::ZERO,
            domain_name: default_domain_name(),
            domain_version: default_domain_version(),
            waku_url: default_waku_url(),
            rpc_url: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
