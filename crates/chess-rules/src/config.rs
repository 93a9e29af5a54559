//! Match configuration loading.
//!
//! Settings are read from TOML. Every field has a default, so an empty
//! document yields [`MatchConfig::default`].

use std::path::Path;

use chess_board::PieceKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The document is not valid TOML for [`MatchConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// `auto_promotion` names a kind a pawn cannot become.
    #[error("cannot auto-promote to {0}: expected rook, knight, bishop or queen")]
    InvalidPromotionPiece(PieceKind),
}

/// How pawn promotions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPolicy {
    /// Promote immediately to [`MatchConfig::auto_promotion`].
    #[default]
    Auto,
    /// Leave the pawn pending until
    /// [`MatchEngine::replace_promoted_piece`](crate::MatchEngine::replace_promoted_piece)
    /// is called.
    Manual,
}

/// Settings for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub promotion: PromotionPolicy,
    /// Kind chosen under [`PromotionPolicy::Auto`]. Defaults to queen.
    #[serde(default = "default_auto_promotion")]
    pub auto_promotion: PieceKind,
}

fn default_auto_promotion() -> PieceKind {
    PieceKind::Queen
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            promotion: PromotionPolicy::default(),
            auto_promotion: default_auto_promotion(),
        }
    }
}

impl MatchConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Configuration for the player-choice promotion flow.
    pub fn manual_promotion() -> Self {
        MatchConfig {
            promotion: PromotionPolicy::Manual,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.auto_promotion.is_promotion_target() {
            return Err(ConfigError::InvalidPromotionPiece(self.auto_promotion));
        }
        Ok(())
    }
}
