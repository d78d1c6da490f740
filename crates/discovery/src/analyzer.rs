use crate::classifier::Classifier;
use crate::error::{DiscoveryError, Result};
use crate::layer::Layer;
use crate::model::{ComponentInfo, ProjectInfo};
use crate::scanner::SourceScanner;
use crate::strategy::{DiscoveryStrategy, UnitOrigin};
use litegen_go_syntax::GoAnalyzer;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Directory holding all analyzed source areas
pub const SOURCE_ROOT: &str = "internal";

/// Immutable facts about one generation run, shared by every phase
#[derive(Clone)]
pub struct GenerationContext {
    pub module_name: String,
    pub project_root: PathBuf,
    pub config_path: String,
    pub classifier: Arc<Classifier>,
}

impl GenerationContext {
    pub fn new(module_name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            module_name: module_name.into(),
            project_root: project_root.into(),
            config_path: String::new(),
            classifier: Arc::new(Classifier::standard()),
        }
    }

    pub fn with_config_path(mut self, config_path: impl Into<String>) -> Self {
        self.config_path = config_path.into();
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Go import path of the directory containing `relative_file`
    pub fn package_path(&self, relative_file: &Path) -> String {
        let dirs: Vec<String> = relative_file
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|component| match component {
                        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if dirs.is_empty() {
            self.module_name.clone()
        } else {
            format!("{}/{}", self.module_name, dirs.join("/"))
        }
    }
}

/// A directory under `internal/` analyzed with one strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceArea {
    pub dir: &'static str,
    pub strategy: DiscoveryStrategy,
}

impl SourceArea {
    /// Standard areas in analysis order
    pub const STANDARD: [SourceArea; 8] = [
        SourceArea::type_first("entities"),
        SourceArea::function_first("infras"),
        SourceArea::type_first("repositories"),
        SourceArea::type_first("services"),
        SourceArea::type_first("controllers"),
        SourceArea::type_first("middlewares"),
        SourceArea::type_first("listeners"),
        SourceArea::type_first("schedulers"),
    ];

    const fn type_first(dir: &'static str) -> Self {
        Self {
            dir,
            strategy: DiscoveryStrategy::TypeFirst,
        }
    }

    const fn function_first(dir: &'static str) -> Self {
        Self {
            dir,
            strategy: DiscoveryStrategy::FunctionFirst,
        }
    }

    fn path(&self, project_root: &Path) -> PathBuf {
        project_root.join(SOURCE_ROOT).join(self.dir)
    }
}

/// Walks the source areas of a project and aggregates discovered components
pub struct ProjectAnalyzer {
    context: GenerationContext,
    areas: Vec<SourceArea>,
}

impl ProjectAnalyzer {
    pub fn new(context: GenerationContext) -> Self {
        Self {
            context,
            areas: SourceArea::STANDARD.to_vec(),
        }
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Analyze every area one after another
    pub fn analyze(&self) -> Result<ProjectInfo> {
        let mut info = self.empty_info();
        for area in &self.areas {
            let components = analyze_area(&self.context, *area)?;
            info.extend(components);
        }

        self.log_totals(&info);
        Ok(info)
    }

    /// Analyze areas on blocking tasks, merging in area order
    ///
    /// Produces the same `ProjectInfo` as [`ProjectAnalyzer::analyze`].
    pub async fn analyze_parallel(&self) -> Result<ProjectInfo> {
        let mut tasks = JoinSet::new();
        for (idx, area) in self.areas.iter().copied().enumerate() {
            let context = self.context.clone();
            tasks.spawn_blocking(move || (idx, analyze_area(&context, area)));
        }

        let mut slots: Vec<Option<Vec<ComponentInfo>>> = vec![None; self.areas.len()];
        let mut first_error: Option<(usize, DiscoveryError)> = None;
        while let Some(joined) = tasks.join_next().await {
            let (idx, result) = joined.map_err(|e| DiscoveryError::Task(e.to_string()))?;
            match result {
                Ok(components) => slots[idx] = Some(components),
                Err(e) => {
                    // Report the error of the earliest area, as a sequential run would
                    if first_error.as_ref().map_or(true, |(seen, _)| idx < *seen) {
                        first_error = Some((idx, e));
                    }
                }
            }
        }

        if let Some((_, e)) = first_error {
            return Err(e);
        }

        let mut info = self.empty_info();
        for components in slots.into_iter().flatten() {
            info.extend(components);
        }

        self.log_totals(&info);
        Ok(info)
    }

    fn empty_info(&self) -> ProjectInfo {
        let mut info = ProjectInfo::new(&self.context.module_name, &self.context.project_root);
        info.config_path = self.context.config_path.clone();
        info
    }

    fn log_totals(&self, info: &ProjectInfo) {
        for layer in Layer::ALL {
            let count = info.count(layer);
            if count > 0 {
                log::info!("Discovered {count} {layer} components");
            }
        }
        log::info!("Discovered {} components in total", info.total());
    }
}

/// Discover components of one area in file order
fn analyze_area(context: &GenerationContext, area: SourceArea) -> Result<Vec<ComponentInfo>> {
    let root = area.path(&context.project_root);
    let files = SourceScanner::new(&root).scan()?;
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let mut analyzer = GoAnalyzer::new().map_err(|e| DiscoveryError::parse(area.dir, e))?;
    let mut components = Vec::new();

    for file in files {
        let relative = file
            .strip_prefix(&context.project_root)
            .unwrap_or(&file)
            .to_path_buf();

        let Some(layer) = context.classifier.classify(&relative) else {
            log::debug!("No layer for {}", relative.display());
            continue;
        };

        let unit = analyzer
            .parse_file(&file)
            .map_err(|e| DiscoveryError::parse(area.dir, e))?;

        let package_path = context.package_path(&relative);
        let found = area.strategy.discover(
            &unit,
            UnitOrigin {
                layer,
                package_path: &package_path,
                file: &file,
            },
        );
        log::debug!(
            "{}: {} {} components",
            relative.display(),
            found.len(),
            layer
        );
        components.extend(found);
    }

    Ok(components)
}
