//! Analysis configuration
//!
//! Defaults, optionally overridden by a YAML file and then by `CRYPTAN_*`
//! environment variables.
//!
//! ```yaml
//! max_key_length: 20
//! target_ic: 0.068
//! substitution:
//!   steps: 8000
//!   restarts: 4
//!   initial_temperature: 10.0
//!   seed: 24301
//! ```

use crate::coincidence::{DEFAULT_MAX_KEY_LENGTH, ENGLISH_TARGET_IC};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Largest period the key-length estimator considers
    pub max_key_length: usize,
    /// Average group IC the key-length estimator aims for
    pub target_ic: f64,
    pub substitution: SubstitutionConfig,
}

/// Search budget of the substitution solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Annealing proposals per restart
    pub steps: usize,
    pub restarts: usize,
    pub initial_temperature: f64,
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            target_ic: ENGLISH_TARGET_IC,
            substitution: SubstitutionConfig::default(),
        }
    }
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            steps: 8000,
            restarts: 4,
            initial_temperature: 10.0,
            seed: 0x5eed,
        }
    }
}

impl AnalysisConfig {
    /// `<config dir>/cryptan/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cryptan").join("config.yaml"))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// when present and silently skipped otherwise. Environment overrides
    /// are applied last and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply `CRYPTAN_*` variables from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply overrides from `lookup`. Values that fail to parse are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        override_from(&lookup, "CRYPTAN_MAX_KEY_LEN", &mut self.max_key_length);
        override_from(&lookup, "CRYPTAN_TARGET_IC", &mut self.target_ic);
        override_from(&lookup, "CRYPTAN_SA_STEPS", &mut self.substitution.steps);
        override_from(&lookup, "CRYPTAN_SA_RESTARTS", &mut self.substitution.restarts);
        override_from(&lookup, "CRYPTAN_SEED", &mut self.substitution.seed);
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_key_length == 0 {
            return Err(Error::InvalidConfig("max_key_length must be at least 1".into()));
        }
        if !self.target_ic.is_finite() || self.target_ic < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "target_ic must be a non-negative number, got {}",
                self.target_ic
            )));
        }
        if self.substitution.restarts == 0 {
            return Err(Error::InvalidConfig("substitution.restarts must be at least 1".into()));
        }
        if !self.substitution.initial_temperature.is_finite()
            || self.substitution.initial_temperature <= 0.0
        {
            return Err(Error::InvalidConfig(
                "substitution.initial_temperature must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn override_from<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, slot: &mut T) {
    if let Some(raw) = lookup(name) {
        match raw.trim().parse() {
            Ok(value) => *slot = value,
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, "ignoring unparseable override")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_key_length, 20);
        assert_eq!(config.target_ic, 0.068);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "max_key_length: 12\nsubstitution:\n  steps: 100\n";
        let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.max_key_length, 12);
        assert_eq!(config.target_ic, 0.068);
        assert_eq!(config.substitution.steps, 100);
        assert_eq!(config.substitution.restarts, 4);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = AnalysisConfig::default();
        config.substitution.seed = 99;
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AnalysisConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        assert!(matches!(
            AnalysisConfig::from_yaml_str("max_key_length: [oops"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_ic: 0.07").unwrap();
        writeln!(file, "substitution:").unwrap();
        writeln!(file, "  restarts: 2").unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.target_ic, 0.07);
        assert_eq!(config.substitution.restarts, 2);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(matches!(AnalysisConfig::load(Some(missing.as_path())), Err(Error::Io(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CRYPTAN_MAX_KEY_LEN", "8"),
            ("CRYPTAN_SA_STEPS", " 500 "),
            ("CRYPTAN_SEED", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AnalysisConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.max_key_length, 8);
        assert_eq!(config.substitution.steps, 500);
        assert_eq!(config.substitution.seed, 0x5eed);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalysisConfig::default();
        config.max_key_length = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = AnalysisConfig::default();
        config.target_ic = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.substitution.restarts = 0;
        assert!(config.validate().is_err());
    }
}
