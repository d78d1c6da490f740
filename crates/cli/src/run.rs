use crate::config::{ConfigError, GeneratorConfig};
use litegen_codegen::{CodegenError, ContainerBuilder, GenerationReport};
use litegen_discovery::{
    read_module_name, DiscoveryError, FactoryResolver, GenerationContext, ManifestError,
    ProjectAnalyzer,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Closed set of failure categories surfaced by a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Manifest,
    Parse,
    Io,
    Render,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Manifest => "manifest",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Render => "render",
        }
    }
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("find module name failed: {0}")]
    Manifest(#[from] ManifestError),

    #[error("parse project failed: {0}")]
    Parse(#[source] DiscoveryError),

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("generate code failed: {0}")]
    Render(#[source] CodegenError),
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Validation(_) => ErrorKind::Validation,
            GenerateError::Manifest(_) => ErrorKind::Manifest,
            GenerateError::Parse(_) => ErrorKind::Parse,
            GenerateError::Io { .. } => ErrorKind::Io,
            GenerateError::Render(_) => ErrorKind::Render,
        }
    }

    fn io(context: &'static str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io {
            context,
            source: Box::new(source),
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(err: ConfigError) -> Self {
        GenerateError::Validation(err.to_string())
    }
}

impl From<DiscoveryError> for GenerateError {
    fn from(err: DiscoveryError) -> Self {
        if err.is_parse_error() {
            GenerateError::Parse(err)
        } else {
            GenerateError::io("scan project failed", err)
        }
    }
}

impl From<CodegenError> for GenerateError {
    fn from(err: CodegenError) -> Self {
        if err.is_render_error() {
            GenerateError::Render(err)
        } else {
            GenerateError::io("generate code failed", err)
        }
    }
}

/// Validate -> resolve module -> analyze -> resolve factories -> build
pub async fn run(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    validate(config)?;

    let project_root = absolute(&config.project_path)?;
    let output_dir = if config.output_dir.is_absolute() {
        config.output_dir.clone()
    } else {
        project_root.join(&config.output_dir)
    };
    log::debug!(
        "Project {} -> output {}",
        project_root.display(),
        output_dir.display()
    );

    let module_name = read_module_name(&project_root)?;

    let context = GenerationContext::new(module_name, &project_root)
        .with_config_path(config.config_path.clone());
    let analyzer = ProjectAnalyzer::new(context);
    let mut info = if config.parallel {
        analyzer.analyze_parallel().await?
    } else {
        analyzer.analyze()?
    };

    let mut resolver = FactoryResolver::new()
        .map_err(|e| GenerateError::Parse(DiscoveryError::parse("factories", e)))?;
    resolver.fill_missing(&mut info);

    let builder = ContainerBuilder::new(
        output_dir,
        config.package_name.clone(),
        config.framework_module.clone(),
    )?;
    let report = builder.generate(&info)?;

    log::info!(
        "Successfully generated container code to {}",
        report.output_dir.display()
    );
    Ok(report)
}

/// Input checks that need no I/O
pub fn validate(config: &GeneratorConfig) -> Result<(), GenerateError> {
    check_path("project path", &config.project_path)?;
    check_path("output directory", &config.output_dir)?;

    if config.config_path.is_empty() {
        return Err(GenerateError::Validation(
            "config path must not be empty".to_string(),
        ));
    }
    if config.config_path.contains('\0') {
        return Err(GenerateError::Validation(
            "config path contains invalid characters".to_string(),
        ));
    }
    if config.framework_module.trim().is_empty() {
        return Err(GenerateError::Validation(
            "framework module must not be empty".to_string(),
        ));
    }
    if !is_go_identifier(&config.package_name) {
        return Err(GenerateError::Validation(format!(
            "package name `{}` is not a valid Go identifier",
            config.package_name
        )));
    }

    Ok(())
}

pub(crate) fn check_path(what: &str, path: &Path) -> Result<(), GenerateError> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(GenerateError::Validation(format!("{what} must not be empty")));
    }
    if raw.to_string_lossy().contains('\0') {
        return Err(GenerateError::Validation(format!(
            "{what} contains invalid characters"
        )));
    }
    Ok(())
}

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Letters, digits and `_`, not starting with a digit, not a keyword, not `_`
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_alphabetic()) {
        return false;
    }
    if !chars.all(|c| c == '_' || c.is_alphanumeric()) {
        return false;
    }
    name != "_" && !GO_KEYWORDS.contains(&name)
}

fn absolute(path: &Path) -> Result<PathBuf, GenerateError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| GenerateError::io("get project absolute path failed", e))?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn test_rejects_bad_paths() {
        let mut bad = config();
        bad.project_path = PathBuf::new();
        assert_eq!(validate(&bad).unwrap_err().kind(), ErrorKind::Validation);

        let mut bad = config();
        bad.output_dir = PathBuf::from("out\0dir");
        let err = validate(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("output directory"));
    }

    #[test]
    fn test_rejects_bad_package_names() {
        for name in ["", "1app", "my-app", "func", "_"] {
            let mut bad = config();
            bad.package_name = name.to_string();
            assert!(validate(&bad).is_err(), "accepted `{name}`");
        }
        assert!(validate(&config()).is_ok());
    }

    #[test]
    fn test_go_identifiers() {
        assert!(is_go_identifier("application"));
        assert!(is_go_identifier("_internal"));
        assert!(is_go_identifier("app2"));
        assert!(!is_go_identifier("2app"));
        assert!(!is_go_identifier("type"));
    }

    #[test]
    fn test_error_kinds() {
        let manifest = GenerateError::from(ManifestError::Missing(PathBuf::from("/x")));
        assert_eq!(manifest.kind(), ErrorKind::Manifest);
        assert_eq!(manifest.kind().as_str(), "manifest");

        let walk_like = DiscoveryError::Task("boom".to_string());
        assert_eq!(GenerateError::from(walk_like).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_settings_file_errors_are_validation_errors() {
        let err = GenerateError::from(ConfigError::Read {
            path: PathBuf::from("/x/litegen.toml"),
            source: std::io::Error::other("denied"),
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().starts_with("invalid configuration: "));
        assert!(err.to_string().contains("litegen.toml"));
    }
}
