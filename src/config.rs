//! Report configuration types

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default result file locations, in preference order
pub const DEFAULT_PATTERNS: &[&str] = &[
    "BenchmarkDotNet.Artifacts/results/*-report.csv",
    "Benchmarks/BenchmarkDotNet.Artifacts/results/*-report.csv",
];

/// Default chart location
pub const DEFAULT_OUTPUT: &str = "assets/overview.png";

/// Report configuration
///
/// Everything the pipeline touches on disk comes from here, so the same
/// run can be pointed at any input tree and output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the search patterns are resolved against
    pub root: PathBuf,

    /// Glob patterns for result files, in preference order
    pub patterns: Vec<String>,

    /// Chart output path; `.svg` selects the SVG backend, anything else PNG
    pub output: PathBuf,

    /// CSV field delimiter
    pub delimiter: char,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: ',',
            width: 1200,
            height: 1200,
        }
    }
}

impl ReportConfig {
    /// Create a config searching under `root` with the default patterns
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON file; absent fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))
    }

    /// Replace the search patterns
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the chart output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the image size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ConfigError::InvalidDelimiter(format!(
                    "{:?} is not a single-byte ASCII character",
                    self.delimiter
                ))
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidPatterns(
                "at least one search pattern is required".into(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidOutput(
                "output path must not be empty".into(),
            ));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidSize(format!(
                "{}x{} has a zero dimension",
                self.width, self.height
            )));
        }

        self.delimiter_byte()?;

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read or parsed
    #[error("Failed to read config: {0}")]
    Read(String),

    /// Invalid search patterns
    #[error("Invalid patterns: {0}")]
    InvalidPatterns(String),

    /// Invalid output path
    #[error("Invalid output: {0}")]
    InvalidOutput(String),

    /// Invalid image size
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Invalid CSV delimiter
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.patterns.len(), 2);
        assert_eq!(
            config.patterns[0],
            "BenchmarkDotNet.Artifacts/results/*-report.csv"
        );
        assert_eq!(config.output, PathBuf::from("assets/overview.png"));
        assert_eq!(config.delimiter, ',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = ReportConfig::new("/data")
            .with_patterns(["out/*.csv"])
            .with_output("chart.svg")
            .with_delimiter(';')
            .with_size(800, 600);

        assert_eq!(config.root, PathBuf::from("/data"));
        assert_eq!(config.patterns, vec!["out/*.csv".to_string()]);
        assert_eq!(config.output, PathBuf::from("chart.svg"));
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn test_config_validation_no_patterns() {
        let config = ReportConfig::default().with_patterns(Vec::<String>::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPatterns(_))
        ));
    }

    #[test]
    fn test_config_validation_empty_output() {
        let config = ReportConfig::default().with_output("");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidOutput(_))));
    }

    #[test]
    fn test_config_validation_zero_size() {
        let config = ReportConfig::default().with_size(0, 100);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSize(_))));
    }

    #[test]
    fn test_config_validation_wide_delimiter() {
        let config = ReportConfig::default().with_delimiter('μ');
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelimiter(_))
        ));
    }

    #[test]
    fn test_config_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"output": "out/chart.svg", "width": 640}}"#).unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output, PathBuf::from("out/chart.svg"));
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 1200);
        assert_eq!(config.patterns.len(), 2);
    }

    #[test]
    fn test_config_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        assert!(matches!(
            ReportConfig::from_file(file.path()),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = ReportConfig::new("bench").with_output("x.png");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ReportConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }
}
