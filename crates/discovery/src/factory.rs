use crate::layer::Layer;
use crate::model::{ComponentInfo, ProjectInfo};
use crate::strategy::{factory_name_for, DiscoveryStrategy};
use litegen_go_syntax::{GoAnalyzer, Result as SyntaxResult, SourceUnit};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Second-chance lookup of constructors for capabilities discovered without one
///
/// Searches the component's own file, then the other `*.go` files of its directory.
/// Parsed units are memoized per instance.
pub struct FactoryResolver {
    analyzer: GoAnalyzer,
    units: HashMap<PathBuf, Option<SourceUnit>>,
}

impl FactoryResolver {
    pub fn new() -> SyntaxResult<Self> {
        Ok(Self {
            analyzer: GoAnalyzer::new()?,
            units: HashMap::new(),
        })
    }

    fn needs_lookup(component: &ComponentInfo) -> bool {
        component.factory.is_none()
            && component.layer != Layer::Entity
            && component.layer.strategy() == DiscoveryStrategy::TypeFirst
    }

    /// Factory function name for a component, if one can be found
    pub fn resolve(&mut self, component: &ComponentInfo) -> Option<String> {
        let wanted = factory_name_for(&component.name);

        if self.defines(&component.file, &wanted) {
            return Some(wanted);
        }

        let dir = component.file.parent()?;
        let siblings: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_sibling_source(path, &component.file))
            .collect();

        for sibling in siblings {
            if self.defines(&sibling, &wanted) {
                log::debug!(
                    "Resolved {} for {} in {}",
                    wanted,
                    component.name,
                    sibling.display()
                );
                return Some(wanted);
            }
        }

        None
    }

    /// Fill in missing factories across all layers, returning how many were found
    pub fn fill_missing(&mut self, info: &mut ProjectInfo) -> usize {
        self.units.clear();

        let mut filled = 0;
        for components in info.layers.values_mut() {
            for component in components.iter_mut().filter(|c| Self::needs_lookup(c)) {
                if let Some(factory) = self.resolve(component) {
                    component.factory = Some(factory);
                    filled += 1;
                } else {
                    log::debug!("No factory found for {}", component.name);
                }
            }
        }

        self.units.clear();
        if filled > 0 {
            log::info!("Resolved {filled} factories from sibling sources");
        }
        filled
    }

    fn defines(&mut self, path: &Path, function: &str) -> bool {
        if !self.units.contains_key(path) {
            let unit = match self.analyzer.parse_file(path) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    log::warn!("Skipping {} during factory lookup: {e}", path.display());
                    None
                }
            };
            self.units.insert(path.to_path_buf(), unit);
        }

        self.units
            .get(path)
            .and_then(Option::as_ref)
            .is_some_and(|unit| unit.has_function(function))
    }
}

fn is_sibling_source(path: &Path, own: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    path != own && name.ends_with(".go") && !name.ends_with("_test.go")
}
