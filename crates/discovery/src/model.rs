use crate::layer::Layer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One discovered (type, optional factory, layer) tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Capability or structural type name (`IUserService`, `Message`, `DatabaseManager`)
    pub name: String,
    /// Package-qualified type (`services.IUserService`), or a bare identifier
    pub qualified_type: String,
    /// Go import path of the originating package
    pub package_path: String,
    pub file: PathBuf,
    pub factory: Option<String>,
    pub layer: Layer,
}

/// Aggregated analysis result, read-only once handed to code generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub module_name: String,
    pub project_root: PathBuf,
    pub config_path: String,
    pub layers: BTreeMap<Layer, Vec<ComponentInfo>>,
}

impl ProjectInfo {
    pub fn new(module_name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            module_name: module_name.into(),
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Add a component to its layer
    ///
    /// A component whose name already exists in the layer replaces the earlier one
    /// at the earlier one's position.
    pub fn insert(&mut self, component: ComponentInfo) {
        let list = self.layers.entry(component.layer).or_default();
        match list.iter_mut().find(|existing| existing.name == component.name) {
            Some(existing) => {
                log::debug!(
                    "Component {} redeclared in {} (was {})",
                    component.name,
                    component.file.display(),
                    existing.file.display()
                );
                *existing = component;
            }
            None => list.push(component),
        }
    }

    pub fn extend(&mut self, components: impl IntoIterator<Item = ComponentInfo>) {
        for component in components {
            self.insert(component);
        }
    }

    pub fn components(&self, layer: Layer) -> &[ComponentInfo] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.components(layer).len()
    }

    pub fn total(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn component(name: &str, file: &str) -> ComponentInfo {
        ComponentInfo {
            name: name.to_string(),
            qualified_type: format!("services.{name}"),
            package_path: "example.com/app/internal/services".to_string(),
            file: PathBuf::from(file),
            factory: None,
            layer: Layer::Service,
        }
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let mut info = ProjectInfo::new("example.com/app", "/tmp/app");
        info.insert(component("IAService", "a.go"));
        info.insert(component("IBService", "b.go"));
        info.insert(component("IAService", "c.go"));

        let services = info.components(Layer::Service);
        let names: Vec<_> = services
            .iter()
            .map(|c| (c.name.as_str(), c.file.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("IAService", "c.go".to_string()),
                ("IBService", "b.go".to_string())
            ]
        );
        assert_eq!(info.total(), 2);
    }

    #[test]
    fn test_missing_layer_is_empty() {
        let info = ProjectInfo::new("example.com/app", "/tmp/app");
        assert!(info.components(Layer::Scheduler).is_empty());
        assert_eq!(info.count(Layer::Scheduler), 0);
    }
}
