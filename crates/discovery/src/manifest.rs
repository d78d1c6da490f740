use crate::error::ManifestError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const MANIFEST_FILE: &str = "go.mod";

static MODULE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^module\s+(\S+)").expect("module regex is valid"));

/// Read the module identity declared by `<project_root>/go.mod`
pub fn read_module_name(project_root: &Path) -> Result<String, ManifestError> {
    let path = project_root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::Missing(project_root.to_path_buf()))
        }
        Err(source) => return Err(ManifestError::Read { path, source }),
    };

    let module = parse_module_name(&content).ok_or(ManifestError::Malformed(path))?;
    log::info!("Module: {module}");
    Ok(module)
}

/// First `module` directive of a manifest, surrounding quotes trimmed
pub fn parse_module_name(content: &str) -> Option<String> {
    let captures = MODULE_LINE.captures(content)?;
    let module = captures[1].trim_matches('"').trim_matches('`');
    (!module.is_empty()).then(|| module.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_module_line() {
        assert_eq!(
            parse_module_name("module github.com/acme/app\n\ngo 1.22\n"),
            Some("github.com/acme/app".to_string())
        );
        assert_eq!(
            parse_module_name("// comment\nmodule \"example.com/quoted\"\n"),
            Some("example.com/quoted".to_string())
        );
        assert_eq!(
            parse_module_name("module example.com/app // trailing\n"),
            Some("example.com/app".to_string())
        );
        assert_eq!(parse_module_name("go 1.22\n"), None);
        assert_eq!(parse_module_name("  module indented.com/app\n"), None);
    }

    #[test]
    fn test_read_errors() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            read_module_name(temp.path()),
            Err(ManifestError::Missing(_))
        ));

        fs::write(temp.path().join(MANIFEST_FILE), "go 1.22\n").unwrap();
        assert!(matches!(
            read_module_name(temp.path()),
            Err(ManifestError::Malformed(_))
        ));

        fs::write(temp.path().join(MANIFEST_FILE), "module example.com/app\n").unwrap();
        assert_eq!(read_module_name(temp.path()).unwrap(), "example.com/app");
    }
}
