use crate::imports::{package_alias, ImportSpec};
use litegen_discovery::{strip_capability_prefix, ComponentInfo, Layer};
use serde::Serialize;
use std::path::Path;

/// Render-ready view of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTemplateData {
    /// Name with the capability prefix removed
    pub type_name: String,
    pub interface_name: String,
    /// Alias-qualified type used as the registration type argument
    pub interface_type: String,
    pub package_path: String,
    pub package_alias: String,
    pub factory_func: Option<String>,
}

impl ComponentTemplateData {
    pub fn from_component(component: &ComponentInfo) -> Self {
        let alias = package_alias(&component.package_path).to_string();
        let interface_type = if component.qualified_type.contains('.') {
            component.qualified_type.clone()
        } else {
            format!("{alias}.{}", component.name)
        };

        Self {
            type_name: strip_capability_prefix(&component.name).to_string(),
            interface_name: component.name.clone(),
            interface_type,
            package_path: component.package_path.clone(),
            package_alias: alias,
            factory_func: component.factory.clone(),
        }
    }
}

/// Convert and sort by interface name, ties broken by package path
pub fn convert_components(components: &[ComponentInfo]) -> Vec<ComponentTemplateData> {
    let mut converted: Vec<_> = components
        .iter()
        .map(ComponentTemplateData::from_component)
        .collect();
    converted.sort_by(|a, b| {
        a.interface_name
            .cmp(&b.interface_name)
            .then_with(|| a.package_path.cmp(&b.package_path))
    });
    converted
}

/// Whether a component produces a registration statement in its layer file
pub fn is_rendered(component: &ComponentInfo) -> bool {
    component.layer == Layer::Entity || component.factory.is_some()
}

/// Parameter of a generated `Init*Container` function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitParam {
    pub name: String,
    pub container_type: String,
}

/// Local variable holding a layer's container inside generated code
pub fn container_var(layer: Layer) -> String {
    format!("{}Container", layer.as_str())
}

/// Containers an `Init*Container` function receives, in argument order
pub fn init_dependencies(layer: Layer) -> &'static [Layer] {
    match layer {
        Layer::Config | Layer::Entity => &[],
        Layer::Manager => &[Layer::Config],
        Layer::Repository => &[Layer::Config, Layer::Manager, Layer::Entity],
        Layer::Service => &[Layer::Config, Layer::Manager, Layer::Repository],
        Layer::Controller | Layer::Middleware => &[Layer::Config, Layer::Manager, Layer::Service],
        Layer::Listener | Layer::Scheduler => &[Layer::Service],
    }
}

pub fn init_params(layer: Layer) -> Vec<InitParam> {
    init_dependencies(layer)
        .iter()
        .map(|dep| InitParam {
            name: container_var(*dep),
            container_type: dep.container_name(),
        })
        .collect()
}

/// Everything one container file is rendered from
#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub package_name: String,
    pub framework_module: String,
    pub layer: String,
    pub init_fn: String,
    pub container_type: String,
    pub register_fn: String,
    pub base_type: String,
    pub params: Vec<InitParam>,
    pub imports: Vec<ImportSpec>,
    pub components: Vec<ComponentTemplateData>,
}

/// One `Init*Container` call inside `NewEngine`
#[derive(Debug, Clone, Serialize)]
pub struct EngineStep {
    pub var: String,
    pub init_fn: String,
    pub args: Vec<String>,
}

/// Data for `engine.go`
#[derive(Debug, Clone, Serialize)]
pub struct EngineTemplateData {
    pub package_name: String,
    pub framework_module: String,
    pub config_path: String,
    pub config_driver: String,
    pub steps: Vec<EngineStep>,
    /// Containers handed to `server.NewEngine` after the builtin config
    pub engine_args: Vec<String>,
}

/// Layers whose containers the engine receives directly
const ENGINE_LAYERS: [Layer; 7] = [
    Layer::Entity,
    Layer::Repository,
    Layer::Service,
    Layer::Controller,
    Layer::Middleware,
    Layer::Listener,
    Layer::Scheduler,
];

impl EngineTemplateData {
    pub fn new(package_name: &str, framework_module: &str, config_path: &str) -> Self {
        let steps = Layer::ALL
            .iter()
            .map(|layer| EngineStep {
                var: container_var(*layer),
                init_fn: layer.init_fn(),
                args: init_dependencies(*layer)
                    .iter()
                    .map(|dep| container_var(*dep))
                    .collect(),
            })
            .collect();

        Self {
            package_name: package_name.to_string(),
            framework_module: framework_module.to_string(),
            config_path: go_string_body(config_path),
            config_driver: config_driver(config_path).to_string(),
            steps,
            engine_args: ENGINE_LAYERS.iter().map(|layer| container_var(*layer)).collect(),
        }
    }
}

/// Config manager driver derived from the config file extension
pub fn config_driver(config_path: &str) -> &'static str {
    let ext = Path::new(config_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => "json",
        _ => "yaml",
    }
}

/// Escape text for use between the quotes of a Go string literal
fn go_string_body(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}
