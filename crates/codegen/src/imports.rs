use litegen_discovery::ComponentInfo;
use serde::Serialize;
use std::collections::BTreeMap;

/// Framework packages referenced by qualified types without living under `manager/`
const HELPER_PACKAGES: &[&str] = &["common", "config"];

/// Managers shipped inside the server's builtin tree
const BUILTIN_MANAGERS: &[&str] = &["telemetrymgr"];

/// Short identifier for an import path: its last `/` segment
pub fn package_alias(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// One entry of a generated import block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSpec {
    pub alias: String,
    pub path: String,
}

/// Builds the alias -> import path table of one generated file
pub struct ImportResolver<'a> {
    module_name: &'a str,
    framework_module: &'a str,
}

impl<'a> ImportResolver<'a> {
    pub fn new(module_name: &'a str, framework_module: &'a str) -> Self {
        Self {
            module_name,
            framework_module,
        }
    }

    /// Import table for the components a file will reference
    ///
    /// Aliases are unique keys: when two paths share a trailing segment the first one
    /// is kept and the clash is logged.
    pub fn collect<'c>(
        &self,
        components: impl IntoIterator<Item = &'c ComponentInfo>,
    ) -> BTreeMap<String, String> {
        let mut table = BTreeMap::new();

        for component in components {
            let path = component.package_path.as_str();
            if !path.is_empty() && path != self.module_name {
                self.add(&mut table, package_alias(path), path.to_string());
            }

            if let Some((package, _)) = component.qualified_type.split_once('.') {
                if let Some(path) = self.framework_path(package) {
                    if !table.contains_key(package) {
                        table.insert(package.to_string(), path);
                    }
                }
            }
        }

        table
    }

    /// Import path of a package named only through a qualified type
    fn framework_path(&self, package: &str) -> Option<String> {
        if package.is_empty() || package == self.module_name {
            return None;
        }

        let framework = self.framework_module;
        let path = if HELPER_PACKAGES.contains(&package) {
            format!("{framework}/{package}")
        } else if BUILTIN_MANAGERS.contains(&package) {
            format!("{framework}/server/builtin/manager/{package}")
        } else {
            format!("{framework}/manager/{package}")
        };
        Some(path)
    }

    fn add(&self, table: &mut BTreeMap<String, String>, alias: &str, path: String) {
        match table.get(alias) {
            None => {
                table.insert(alias.to_string(), path);
            }
            Some(existing) if *existing == path => {}
            Some(existing) => log::warn!(
                "Import alias `{alias}` is shared by {existing} and {path}; keeping {existing}"
            ),
        }
    }
}

pub fn to_specs(table: BTreeMap<String, String>) -> Vec<ImportSpec> {
    table
        .into_iter()
        .map(|(alias, path)| ImportSpec { alias, path })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use litegen_discovery::Layer;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const FRAMEWORK: &str = "github.com/lite-lake/litecore-go";

    fn component(qualified_type: &str, package_path: &str) -> ComponentInfo {
        let name = qualified_type
            .rsplit('.')
            .next()
            .unwrap_or(qualified_type)
            .to_string();
        ComponentInfo {
            name,
            qualified_type: qualified_type.to_string(),
            package_path: package_path.to_string(),
            file: PathBuf::from("x.go"),
            factory: Some("NewX".to_string()),
            layer: Layer::Manager,
        }
    }

    #[test]
    fn test_package_alias() {
        assert_eq!(package_alias("example.com/app/internal/services"), "services");
        assert_eq!(package_alias("example"), "example");
        assert_eq!(package_alias(""), "");
    }

    #[test]
    fn test_qualified_packages_map_to_framework() {
        let resolver = ImportResolver::new("example.com/app", FRAMEWORK);
        let components = [
            component(
                "databasemgr.IDatabaseManager",
                "example.com/app/internal/infras/managers",
            ),
            component(
                "telemetrymgr.ITelemetryManager",
                "example.com/app/internal/infras/managers",
            ),
            component(
                "common.BaseConfigProvider",
                "example.com/app/internal/infras/configproviders",
            ),
        ];

        let table = resolver.collect(&components);
        let expected: BTreeMap<String, String> = [
            ("common", format!("{FRAMEWORK}/common")),
            (
                "configproviders",
                "example.com/app/internal/infras/configproviders".to_string(),
            ),
            ("databasemgr", format!("{FRAMEWORK}/manager/databasemgr")),
            ("managers", "example.com/app/internal/infras/managers".to_string()),
            (
                "telemetrymgr",
                format!("{FRAMEWORK}/server/builtin/manager/telemetrymgr"),
            ),
        ]
        .into_iter()
        .map(|(alias, path)| (alias.to_string(), path))
        .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_own_package_qualifier_is_not_remapped() {
        let resolver = ImportResolver::new("example.com/app", FRAMEWORK);
        let table = resolver.collect(&[component(
            "services.IUserService",
            "example.com/app/internal/services",
        )]);

        assert_eq!(table.len(), 1);
        assert_eq!(table["services"], "example.com/app/internal/services");
    }

    #[test]
    fn test_alias_collision_keeps_first_path() {
        let resolver = ImportResolver::new("example.com/app", FRAMEWORK);
        let first = component("services.IAService", "example.com/app/a/services");
        let second = component("services.IBService", "example.com/app/b/services");

        let table = resolver.collect([&first, &second]);
        assert_eq!(table.len(), 1);
        assert_eq!(table["services"], "example.com/app/a/services");
        assert_eq!(package_alias(&first.package_path), package_alias(&second.package_path));
    }

    #[test]
    fn test_module_root_package_is_skipped() {
        let resolver = ImportResolver::new("example.com/app", FRAMEWORK);
        let table = resolver.collect(&[component("Root", "example.com/app")]);
        assert!(table.is_empty());
    }
}
