use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_DECIMALS: usize = 3;

const IN_CLINIC_W0: &str = "Estimated FRS Score (In-clinic, Week 0)";
const REMOTE_W1: &str = "Estimated FRS Score (Remote, Week 1)";
const REMOTE_W2: &str = "Estimated FRS Score (Remote, Week 2)";
const DOCTOR_W0: &str = "Observed FRS Score (Doctor, Week 0)";
const THERAPIST_W0: &str = "Observed FRS Score (Therapist, Week 0)";
const CAREGIVER_W0: &str = "Observed FRS Score (Caregiver, Week 0)";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Repeated measurements of the same quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnPair {
    pub first: String,
    pub second: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Reference rater against the instrument under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriterionPair {
    pub observed: String,
    pub estimated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColumnPair {
    pub fn new(first: &str, second: &str, label: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            label: Some(label.to_string()),
        }
    }

    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{} vs {}", self.first, self.second))
    }
}

impl CriterionPair {
    pub fn new(observed: &str, estimated: &str, label: &str) -> Self {
        Self {
            observed: observed.to_string(),
            estimated: estimated.to_string(),
            label: Some(label.to_string()),
        }
    }

    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{} vs {}", self.observed, self.estimated))
    }
}

/// Which columns to analyse and where to find them. An empty rater list
/// disables the inter-rater and internal consistency metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,
    #[serde(default)]
    pub test_retest_pairs: Vec<ColumnPair>,
    #[serde(default)]
    pub rater_columns: Vec<String>,
    #[serde(default)]
    pub criterion_pairs: Vec<CriterionPair>,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

fn default_decimals() -> usize {
    DEFAULT_DECIMALS
}

impl AnalysisConfig {
    /// Functional Rating Scale study layout: three estimate sessions and
    /// three week-0 observers.
    pub fn frs_default() -> Self {
        Self {
            dataset: None,
            test_retest_pairs: vec![
                ColumnPair::new(IN_CLINIC_W0, REMOTE_W1, "In-Clinic vs Remote Week 1"),
                ColumnPair::new(REMOTE_W1, REMOTE_W2, "Remote Week 1 vs Remote Week 2"),
                ColumnPair::new(IN_CLINIC_W0, REMOTE_W2, "In-Clinic vs Remote Week 2"),
            ],
            rater_columns: vec![
                DOCTOR_W0.to_string(),
                THERAPIST_W0.to_string(),
                CAREGIVER_W0.to_string(),
            ],
            criterion_pairs: vec![
                CriterionPair::new(DOCTOR_W0, IN_CLINIC_W0, "Doctor vs In-Clinic"),
                CriterionPair::new(THERAPIST_W0, IN_CLINIC_W0, "Therapist vs In-Clinic"),
                CriterionPair::new(CAREGIVER_W0, IN_CLINIC_W0, "Caregiver vs In-Clinic"),
            ],
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&raw, path)?;
        // Relative dataset paths are relative to the config file.
        if let Some(dataset) = &config.dataset {
            if dataset.is_relative() {
                if let Some(parent) = path.parent() {
                    config.dataset = Some(parent.join(dataset));
                }
            }
        }
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.test_retest_pairs.is_empty()
            && self.rater_columns.is_empty()
            && self.criterion_pairs.is_empty()
        {
            return Err(ConfigError::Invalid(
                "no test-retest pairs, rater columns or criterion pairs configured".to_string(),
            ));
        }
        let names = self
            .test_retest_pairs
            .iter()
            .flat_map(|p| [&p.first, &p.second])
            .chain(self.rater_columns.iter())
            .chain(
                self.criterion_pairs
                    .iter()
                    .flat_map(|p| [&p.observed, &p.estimated]),
            );
        for name in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("empty column name".to_string()));
            }
        }
        if self.decimals > 12 {
            return Err(ConfigError::Invalid(format!(
                "decimals must be at most 12, got {}",
                self.decimals
            )));
        }
        Ok(())
    }

    /// Dataset path: the CLI override wins over the configured source.
    pub fn resolve_dataset(&self, cli_input: Option<&Path>) -> Result<PathBuf, ConfigError> {
        cli_input
            .map(Path::to_path_buf)
            .or_else(|| self.dataset.clone())
            .ok_or_else(|| {
                ConfigError::Invalid("no dataset: pass --input or set \"dataset\"".to_string())
            })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/config.rs"]
mod tests;
