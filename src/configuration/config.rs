//! Run configuration loaded from YAML.
//!
//! Physical constants and the population size are compile-time constants (see
//! [`crate::simulation::params`]); the file only controls how the harness
//! drives the kernel. Every field is optional and defaults to the reference
//! run.
//!
//! # YAML format
//!
//! ```yaml
//! seed: 42                # initialization seed
//! steps: 100000           # kernel calls between the two energy readings
//! drift_tolerance: 0.05   # relative energy drift above which a warning is logged
//! verify: false           # also cross-check against the array-of-structures kernel
//! verify_steps: 1000      # steps used by the cross-check
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::simulation::params::{SEED, STEPS};

/// Harness settings for one run
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub seed: u64, // deterministic seed to make runs reproducible
    pub steps: usize, // number of kernel calls
    pub drift_tolerance: f32, // warn above this relative energy drift
    pub verify: bool, // run the reference cross-check as well
    pub verify_steps: usize, // steps for the cross-check
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: SEED,
            steps: STEPS,
            drift_tolerance: 0.05,
            verify: false,
            verify_steps: 1_000,
        }
    }
}

impl RunConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: RunConfig = serde_yaml::from_str(text).context("malformed run configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg: RunConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        cfg.validate()?;
        debug!(?cfg, path = %path.display(), "loaded run configuration");
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.drift_tolerance.is_finite() && self.drift_tolerance > 0.0,
            "drift_tolerance must be positive, got {}",
            self.drift_tolerance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_reference_run() {
        // serde_yaml reads an empty document as unit, so use an empty map
        let cfg = RunConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.steps, 100_000);
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = RunConfig::from_yaml_str("seed: 7\nsteps: 10\nverify: true\n").unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.steps, 10);
        assert!(cfg.verify);
        assert_eq!(cfg.verify_steps, 1_000);
    }

    #[test]
    fn rejects_unknown_and_invalid_fields() {
        assert!(RunConfig::from_yaml_str("bodies: 12\n").is_err());
        assert!(RunConfig::from_yaml_str("drift_tolerance: -1.0\n").is_err());
        assert!(RunConfig::from_yaml_str("steps: many\n").is_err());
    }
}
