use crate::{forecast::CategoryMix, regulation::RegulationRuleSet, types::RegionCode};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "engine_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Region used when the caller does not name one.
    pub default_region: RegionCode,
    /// Substituted for any regulation key a region does not define.
    #[serde(default)]
    pub regulation_defaults: RegulationRuleSet,
    /// Category split used when a weekday row, or one of its columns, is missing.
    #[serde(default)]
    pub category_defaults: CategoryMix,
}

impl EngineConfig {
    /// Load from `{data_dir}/engine_config.json`.
    /// In tests, use EngineConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            default_region:      "FR".into(),
            regulation_defaults: RegulationRuleSet::default(),
            category_defaults:   CategoryMix::default(),
        }
    }
}
