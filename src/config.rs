// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine configuration

use crate::canon::CanonicalizeParams;
use crate::conway::OperatorParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`EngineConfig::load`]
pub const CONFIG_FILE: &str = "conway.toml";

/// Operator and canonicalization settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Geometric parameters for kis and chamfer
    pub operators: OperatorParams,
    /// Relaxation settings
    pub canonicalize: CanonicalizeParams,
}

impl EngineConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `conway.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(iterations) = std::env::var("CONWAY_ITERATIONS") {
            config.canonicalize.iterations = iterations
                .parse()
                .with_context(|| format!("Invalid CONWAY_ITERATIONS: {}", iterations))?;
        }

        if let Ok(scale) = std::env::var("CONWAY_SCALE_FACTOR") {
            config.canonicalize.scale_factor = scale
                .parse()
                .with_context(|| format!("Invalid CONWAY_SCALE_FACTOR: {}", scale))?;
        }

        if let Ok(tolerance) = std::env::var("CONWAY_TOLERANCE") {
            config.canonicalize.tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid CONWAY_TOLERANCE: {}", tolerance))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.operators.validate()?;
        self.canonicalize.validate()?;
        Ok(())
    }
}
