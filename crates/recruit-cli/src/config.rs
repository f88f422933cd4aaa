//! Pipeline configuration loaded from TOML.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [paths]
//! input = "data/raw/candidates.csv"
//! database = "data/processed/recruitment_dw.db"
//!
//! [rules]
//! code_challenge = 7.0
//! technical_interview = 7.0
//!
//! [integrity]
//! policy = "abort"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use recruit_ingest::{DEFAULT_SEPARATOR, ExtractOptions};
use recruit_load::LoadOptions;
use recruit_model::{HiringThresholds, IntegrityPolicy};
use recruit_report::KpiOptions;
use recruit_report::kpi::DEFAULT_TRACKED_COUNTRIES;
use recruit_transform::TransformOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub extract: ExtractConfig,
    pub rules: HiringThresholds,
    pub integrity: IntegrityConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub database: PathBuf,
    /// DDL script replacing the embedded one.
    pub ddl: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/raw/candidates.csv"),
            database: PathBuf::from("data/processed/recruitment_dw.db"),
            ddl: None,
            export_dir: PathBuf::from("data/processed/powerbi_export"),
            report_dir: PathBuf::from("diagrams"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub separator: char,
    /// Rows scanned for dtype inference; unset scans the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            separator: char::from(DEFAULT_SEPARATOR),
            infer_schema_length: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrityConfig {
    pub policy: IntegrityPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub tracked_countries: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tracked_countries: DEFAULT_TRACKED_COUNTRIES
                .iter()
                .map(|country| (*country).to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Read `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.separator_byte()?;
        let rules = &self.rules;
        for (name, value) in [
            ("code_challenge", rules.code_challenge),
            ("technical_interview", rules.technical_interview),
        ] {
            if !value.is_finite() {
                bail!("rules.{name} must be a finite number, got {value}");
            }
        }
        Ok(())
    }

    fn separator_byte(&self) -> Result<u8> {
        let separator = self.extract.separator;
        match u8::try_from(separator) {
            Ok(byte) if separator.is_ascii() && !separator.is_ascii_alphanumeric() => Ok(byte),
            _ => bail!(
                "extract.separator must be an ASCII punctuation or whitespace character, \
                 got {separator:?}"
            ),
        }
    }

    pub fn extract_options(&self) -> Result<ExtractOptions> {
        Ok(ExtractOptions {
            separator: self.separator_byte()?,
            infer_schema_length: self.extract.infer_schema_length,
        })
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            thresholds: self.rules,
            integrity_policy: self.integrity.policy,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            database: self.paths.database.clone(),
            ddl: self.paths.ddl.clone(),
        }
    }

    pub fn kpi_options(&self) -> KpiOptions {
        KpiOptions {
            tracked_countries: self.report.tracked_countries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.extract.separator, ';');
        assert_eq!(config.integrity.policy, IntegrityPolicy::Abort);
        assert_eq!(config.report.tracked_countries.len(), 4);
    }

    #[test]
    fn sections_override_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [paths]
            input = "in.csv"
            ddl = "schema.sql"

            [extract]
            separator = ","

            [rules]
            code_challenge = 8.5

            [integrity]
            policy = "proceed"

            [report]
            tracked_countries = ["Peru"]
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.input, PathBuf::from("in.csv"));
        assert_eq!(config.paths.ddl, Some(PathBuf::from("schema.sql")));
        assert_eq!(config.paths.database, PathsConfig::default().database);
        assert_eq!(config.extract_options().unwrap().separator, b',');
        assert_eq!(config.rules.code_challenge, 8.5);
        assert_eq!(config.rules.technical_interview, 7.0);
        assert_eq!(config.transform_options().integrity_policy, IntegrityPolicy::Proceed);
        assert_eq!(config.kpi_options().tracked_countries, vec!["Peru".to_string()]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PipelineConfig::from_toml("[paths]\ninptu = \"x.csv\"").is_err());
    }

    #[test]
    fn misspelled_rules_key_is_rejected() {
        let err = PipelineConfig::from_toml("[rules]\ncode_chalenge = 9.0").unwrap_err();
        assert!(format!("{err:#}").contains("code_chalenge"));
    }

    #[test]
    fn non_ascii_separator_is_rejected() {
        let err = PipelineConfig::from_toml("[extract]\nseparator = \"é\"").unwrap_err();
        assert!(err.to_string().contains("extract.separator"));
    }
}
