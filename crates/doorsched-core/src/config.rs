use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_AREA: &str = "Unspecified";

/// Heuristic thresholds for line and table parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Area label applied before any heading has been seen.
    pub default_area: String,
    /// Longest digit-free trailing token treated as a colour by the short-token rule.
    pub colour_max_len: usize,
    /// Minimum length for an all-caps line to count as a heading without a keyword.
    pub min_heading_len: usize,
    /// Minimum length of a product code token.
    pub min_code_len: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            default_area: DEFAULT_AREA.to_string(),
            colour_max_len: 6,
            min_heading_len: 6,
            min_code_len: 3,
        }
    }
}

/// Options passed to an extraction backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// OCR every page regardless of its text layer.
    pub force_ocr: bool,
    /// Pages with less normalized native text than this are OCR'd.
    pub min_text_len: usize,
    /// Rasterization resolution for OCR.
    pub ocr_dpi: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            force_ocr: false,
            min_text_len: 30,
            ocr_dpi: 300,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub parse: ParseConfig,
    pub extract: ExtractOptions,
}

/// Load a pipeline config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ScheduleError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScheduleError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: PipelineConfig =
        serde_json::from_str(&content).map_err(|e| ScheduleError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a pipeline config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<PipelineConfig, ScheduleError> {
    let config: PipelineConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PipelineConfig) -> Result<(), ScheduleError> {
    if config.parse.default_area.trim().is_empty() {
        return Err(ScheduleError::ConfigInvalid(
            "parse.default_area must not be empty".into(),
        ));
    }
    if config.parse.colour_max_len == 0 {
        return Err(ScheduleError::ConfigInvalid(
            "parse.colour_max_len must be at least 1".into(),
        ));
    }
    if config.parse.min_code_len == 0 {
        return Err(ScheduleError::ConfigInvalid(
            "parse.min_code_len must be at least 1".into(),
        ));
    }
    if !(72..=1200).contains(&config.extract.ocr_dpi) {
        return Err(ScheduleError::ConfigInvalid(format!(
            "extract.ocr_dpi {} is outside 72..=1200",
            config.extract.ocr_dpi
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = parse_config_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.parse.default_area, "Unspecified");
        assert_eq!(config.extract.min_text_len, 30);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config_str(r#"{ "parse": { "colour_max_len": 4 } }"#).unwrap();
        assert_eq!(config.parse.colour_max_len, 4);
        assert_eq!(config.parse.min_code_len, 3);
    }

    #[test]
    fn test_empty_default_area_rejected() {
        assert!(parse_config_str(r#"{ "parse": { "default_area": "  " } }"#).is_err());
    }

    #[test]
    fn test_dpi_out_of_range_rejected() {
        assert!(parse_config_str(r#"{ "extract": { "ocr_dpi": 10 } }"#).is_err());
    }

    #[test]
    fn test_unknown_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/doorsched.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::ConfigLoad { .. }));
    }
}
