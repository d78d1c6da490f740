use crate::error::{CodegenError, Result};
use crate::imports::{to_specs, ImportResolver};
use crate::model::{convert_components, init_params, is_rendered, EngineTemplateData, TemplateData};
use crate::templates::TemplateRenderer;
use litegen_discovery::{ComponentInfo, Layer, ProjectInfo};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENGINE_FILE: &str = "engine.go";

/// Outcome of one layer file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerReport {
    pub layer: Layer,
    pub file: PathBuf,
    /// Components discovered for the layer
    pub components: usize,
    /// Components that received a registration statement
    pub registered: usize,
}

/// Summary of a completed generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub module_name: String,
    pub output_dir: PathBuf,
    pub layers: Vec<LayerReport>,
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn total_components(&self) -> usize {
        self.layers.iter().map(|layer| layer.components).sum()
    }

    pub fn total_registered(&self) -> usize {
        self.layers.iter().map(|layer| layer.registered).sum()
    }
}

/// Writes the per-layer container files and `engine.go`
pub struct ContainerBuilder {
    output_dir: PathBuf,
    package_name: String,
    framework_module: String,
    renderer: TemplateRenderer,
}

impl ContainerBuilder {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        package_name: impl Into<String>,
        framework_module: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            output_dir: output_dir.into(),
            package_name: package_name.into(),
            framework_module: framework_module.into(),
            renderer: TemplateRenderer::new()?,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render and write every artifact
    ///
    /// Files already written stay in place when a later one fails.
    pub fn generate(&self, info: &ProjectInfo) -> Result<GenerationReport> {
        fs::create_dir_all(&self.output_dir).map_err(|source| CodegenError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut report = GenerationReport {
            module_name: info.module_name.clone(),
            output_dir: self.output_dir.clone(),
            layers: Vec::with_capacity(Layer::ALL.len()),
            files: Vec::with_capacity(Layer::ALL.len() + 1),
        };

        for layer in Layer::ALL {
            let components = info.components(layer);
            let code = self.render_layer(info, layer, components)?;
            let file = self.write_file(&format!("{}.go", layer.file_stem()), &code)?;

            let registered = components.iter().filter(|c| is_rendered(c)).count();
            log::info!(
                "Generated {} ({} of {} {} components registered)",
                file.display(),
                registered,
                components.len(),
                layer
            );

            report.layers.push(LayerReport {
                layer,
                file: file.clone(),
                components: components.len(),
                registered,
            });
            report.files.push(file);
        }

        let engine = EngineTemplateData::new(
            &self.package_name,
            &self.framework_module,
            &info.config_path,
        );
        let code = self.renderer.render_engine(&engine)?;
        let file = self.write_file(ENGINE_FILE, &code)?;
        log::info!("Generated {}", file.display());
        report.files.push(file);

        Ok(report)
    }

    /// Render one layer file without writing it
    pub fn render_layer(
        &self,
        info: &ProjectInfo,
        layer: Layer,
        components: &[ComponentInfo],
    ) -> Result<String> {
        let resolver = ImportResolver::new(&info.module_name, &self.framework_module);
        let imports = resolver.collect(components.iter().filter(|c| is_rendered(c)));

        let data = TemplateData {
            package_name: self.package_name.clone(),
            framework_module: self.framework_module.clone(),
            layer: layer.as_str().to_string(),
            init_fn: layer.init_fn(),
            container_type: layer.container_name(),
            register_fn: layer.register_fn(),
            base_type: layer.base_type().to_string(),
            params: init_params(layer),
            imports: to_specs(imports),
            components: convert_components(components),
        };

        self.renderer.render_layer(layer, &data)
    }

    fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        fs::write(&path, content).map_err(|source| CodegenError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}
