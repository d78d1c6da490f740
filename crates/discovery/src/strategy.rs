use crate::layer::Layer;
use crate::model::ComponentInfo;
use litegen_go_syntax::{ReturnType, SourceUnit};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CAPABILITY_PREFIX: char = 'I';
const FACTORY_PREFIX: &str = "New";

/// How components are recognised inside one compilation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// Capability types first, factories bound by name afterwards
    TypeFirst,
    /// `New*` constructors define the component; no type declaration needed
    FunctionFirst,
}

/// Where a unit lives, as needed to build components from it
#[derive(Debug, Clone, Copy)]
pub struct UnitOrigin<'a> {
    pub layer: Layer,
    pub package_path: &'a str,
    pub file: &'a Path,
}

impl DiscoveryStrategy {
    pub fn discover(self, unit: &SourceUnit, origin: UnitOrigin<'_>) -> Vec<ComponentInfo> {
        match self {
            DiscoveryStrategy::TypeFirst if origin.layer == Layer::Entity => {
                Self::discover_entities(unit, origin)
            }
            DiscoveryStrategy::TypeFirst => Self::discover_capabilities(unit, origin),
            DiscoveryStrategy::FunctionFirst => Self::discover_constructors(unit, origin),
        }
    }

    fn discover_entities(unit: &SourceUnit, origin: UnitOrigin<'_>) -> Vec<ComponentInfo> {
        unit.structs()
            .filter(|decl| decl.exported)
            .map(|decl| component(origin, &decl.name, decl.name.clone(), None))
            .collect()
    }

    fn discover_capabilities(unit: &SourceUnit, origin: UnitOrigin<'_>) -> Vec<ComponentInfo> {
        unit.interfaces()
            .filter(|decl| is_capability_name(&decl.name))
            .map(|decl| {
                let factory_name = factory_name_for(&decl.name);
                let factory = unit.has_function(&factory_name).then_some(factory_name);
                component(
                    origin,
                    &decl.name,
                    format!("{}.{}", unit.package, decl.name),
                    factory,
                )
            })
            .collect()
    }

    fn discover_constructors(unit: &SourceUnit, origin: UnitOrigin<'_>) -> Vec<ComponentInfo> {
        let mut components = Vec::new();

        for func in &unit.functions {
            let Some(stem) = func.name.strip_prefix(FACTORY_PREFIX) else {
                continue;
            };
            if !func.returns_single_value() {
                continue;
            }

            let (name, qualified_type) = match &func.results[0] {
                ReturnType::Qualified {
                    package, member, ..
                } => (member.clone(), format!("{package}.{member}")),
                ReturnType::Named { name, .. } => (name.clone(), name.clone()),
                ReturnType::Other { .. } if stem.is_empty() => continue,
                ReturnType::Other { .. } => (stem.to_string(), format!("{}.{stem}", unit.package)),
            };

            components.push(component(origin, &name, qualified_type, Some(func.name.clone())));
        }

        components
    }
}

fn component(
    origin: UnitOrigin<'_>,
    name: &str,
    qualified_type: String,
    factory: Option<String>,
) -> ComponentInfo {
    ComponentInfo {
        name: name.to_string(),
        qualified_type,
        package_path: origin.package_path.to_string(),
        file: origin.file.to_path_buf(),
        factory,
        layer: origin.layer,
    }
}

/// Any name starting with `I`: `IUserService`, `Iterator`
pub fn is_capability_name(name: &str) -> bool {
    name.starts_with(CAPABILITY_PREFIX)
}

/// Type name with the capability prefix removed, unless that leaves nothing
pub fn strip_capability_prefix(name: &str) -> &str {
    match name.strip_prefix(CAPABILITY_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}

/// Derived constructor name: `IUserService` -> `NewUserService`
pub fn factory_name_for(name: &str) -> String {
    format!("{FACTORY_PREFIX}{}", strip_capability_prefix(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use litegen_go_syntax::GoAnalyzer;
    use pretty_assertions::assert_eq;

    fn unit(code: &str) -> SourceUnit {
        GoAnalyzer::new().unwrap().parse_str(code, "unit.go").unwrap()
    }

    fn origin(layer: Layer) -> UnitOrigin<'static> {
        UnitOrigin {
            layer,
            package_path: "example.com/app/internal/x",
            file: Path::new("unit.go"),
        }
    }

    #[test]
    fn test_capability_names() {
        assert!(is_capability_name("IUserService"));
        assert!(is_capability_name("Item"));
        assert!(is_capability_name("I"));
        assert!(!is_capability_name("userService"));
        assert!(!is_capability_name("Helper"));
        assert_eq!(strip_capability_prefix("IUserService"), "UserService");
        assert_eq!(strip_capability_prefix("Item"), "tem");
        assert_eq!(strip_capability_prefix("I"), "I");
        assert_eq!(factory_name_for("I"), "NewI");
        assert_eq!(factory_name_for("IMessageRepository"), "NewMessageRepository");
        assert_eq!(factory_name_for("Message"), "NewMessage");
    }

    #[test]
    fn test_type_first_binds_factory() {
        let unit = unit(
            r#"
package services

type IUserService interface{}
type IAuditService interface{}
type Helper interface{}

func NewUserService() IUserService { return nil }
func NewOrphan() IUserService { return nil }
"#,
        );

        let found = DiscoveryStrategy::TypeFirst.discover(&unit, origin(Layer::Service));
        let summary: Vec<_> = found
            .iter()
            .map(|c| (c.name.as_str(), c.qualified_type.as_str(), c.factory.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("IUserService", "services.IUserService", Some("NewUserService")),
                ("IAuditService", "services.IAuditService", None),
            ]
        );
    }

    #[test]
    fn test_type_first_captures_any_i_prefixed_interface() {
        let unit = unit(
            r#"
package services

type Iterator interface{}

func Nterator() Iterator { return nil }
"#,
        );

        let found = DiscoveryStrategy::TypeFirst.discover(&unit, origin(Layer::Service));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Iterator");
        assert_eq!(found[0].qualified_type, "services.Iterator");
        assert_eq!(found[0].factory.as_deref(), Some("Nterator"));
    }

    #[test]
    fn test_entities_are_exported_structs() {
        let unit = unit(
            r#"
package entities

type Message struct{ ID int64 }
type Comment struct{}
type internalRow struct{}
type IEntity interface{}
"#,
        );

        let found = DiscoveryStrategy::TypeFirst.discover(&unit, origin(Layer::Entity));
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Message", "Comment"]);
        assert!(found.iter().all(|c| c.factory.is_none()));
        assert_eq!(found[0].qualified_type, "Message");
    }

    #[test]
    fn test_function_first_infers_names() {
        let unit = unit(
            r#"
package managers

import "example.com/fw/manager/databasemgr"

type DatabaseManager struct{}

func NewDatabaseManager() *DatabaseManager { return nil }
func NewRemoteDatabase() databasemgr.IDatabaseManager { return nil }
func NewCache() (*DatabaseManager, error) { return nil, nil }
func NewHandlers() []DatabaseManager { return nil }
func New() *CacheManager { return nil }
func New() []DatabaseManager { return nil }
func Build() *DatabaseManager { return nil }
"#,
        );

        let found = DiscoveryStrategy::FunctionFirst.discover(&unit, origin(Layer::Manager));
        let summary: Vec<_> = found
            .iter()
            .map(|c| (c.name.as_str(), c.qualified_type.as_str(), c.factory.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("DatabaseManager", "DatabaseManager", Some("NewDatabaseManager")),
                (
                    "IDatabaseManager",
                    "databasemgr.IDatabaseManager",
                    Some("NewRemoteDatabase")
                ),
                ("Handlers", "managers.Handlers", Some("NewHandlers")),
                ("CacheManager", "CacheManager", Some("New")),
            ]
        );
        assert!(found.iter().all(|c| c.layer == Layer::Manager));
    }
}
