use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Optional per-project settings file
pub const CONFIG_FILE: &str = "litegen.toml";

pub const DEFAULT_PROJECT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_DIR: &str = "internal/application";
pub const DEFAULT_PACKAGE_NAME: &str = "application";
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";
pub const DEFAULT_FRAMEWORK_MODULE: &str = "github.com/lite-lake/litecore-go";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fully resolved generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    pub project_path: PathBuf,
    /// Relative paths are resolved against `project_path`
    pub output_dir: PathBuf,
    pub package_name: String,
    /// Emitted verbatim into `engine.go`
    pub config_path: String,
    pub framework_module: String,
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from(DEFAULT_PROJECT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            framework_module: DEFAULT_FRAMEWORK_MODULE.to_string(),
            parallel: false,
        }
    }
}

/// Overridable settings, as found in `[generate]` or on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSettings {
    pub output: Option<PathBuf>,
    pub package: Option<String>,
    pub config: Option<String>,
    pub framework: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generate: GenerateSettings,
}

impl GeneratorConfig {
    /// Merge command-line settings over `litegen.toml` over defaults
    pub fn load(
        project_path: impl Into<PathBuf>,
        cli: &GenerateSettings,
    ) -> Result<Self, ConfigError> {
        let project_path = project_path.into();
        let file = read_config_file(&project_path)?.unwrap_or_default();
        let config = Self::merge(project_path, cli, &file);
        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    pub fn merge(project_path: PathBuf, cli: &GenerateSettings, file: &GenerateSettings) -> Self {
        let defaults = Self::default();
        Self {
            project_path,
            output_dir: pick(&cli.output, &file.output, defaults.output_dir),
            package_name: pick(&cli.package, &file.package, defaults.package_name),
            config_path: pick(&cli.config, &file.config, defaults.config_path),
            framework_module: pick(&cli.framework, &file.framework, defaults.framework_module),
            parallel: pick(&cli.parallel, &file.parallel, defaults.parallel),
        }
    }
}

fn pick<T: Clone>(cli: &Option<T>, file: &Option<T>, default: T) -> T {
    cli.clone().or_else(|| file.clone()).unwrap_or(default)
}

/// `[generate]` table of `<project>/litegen.toml`, if the file exists
pub fn read_config_file(project_path: &Path) -> Result<Option<GenerateSettings>, ConfigError> {
    let path = project_path.join(CONFIG_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let file: ConfigFile =
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
    log::debug!("Loaded {}", path.display());
    Ok(Some(file.generate))
}
