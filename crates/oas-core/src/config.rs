use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::build::SpecFormat;

/// Top-level project configuration loaded from `.oas.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OasConfig {
    pub input: String,
    pub format: FormatHint,
    pub inspect: InspectConfig,
}

impl Default for OasConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            format: FormatHint::Auto,
            inspect: InspectConfig::default(),
        }
    }
}

/// Which document format to read the input as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatHint {
    /// Decide from the top-level `swagger` / `openapi` field.
    #[default]
    Auto,
    Swagger2,
    Openapi3,
}

impl FormatHint {
    /// The forced format, or `None` to detect it.
    pub fn spec_format(self) -> Option<SpecFormat> {
        match self {
            FormatHint::Auto => None,
            FormatHint::Swagger2 => Some(SpecFormat::Swagger2),
            FormatHint::Openapi3 => Some(SpecFormat::OpenApi3),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oas.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OasConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OasConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oas configuration
input: openapi.yaml
format: auto          # auto | swagger2 | openapi3

inspect:
  output: yaml        # yaml | json
"#
}
