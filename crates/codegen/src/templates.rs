use crate::error::{CodegenError, Result};
use crate::model::{EngineTemplateData, TemplateData};
use litegen_discovery::Layer;
use minijinja::{AutoEscape, Environment};

const CONTAINER_TEMPLATE: &str = "container.go.jinja";
const ENTITY_TEMPLATE: &str = "entity_container.go.jinja";
const ENGINE_TEMPLATE: &str = "engine.go.jinja";

/// Go source renderer over the embedded templates
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let sources = [
            (
                CONTAINER_TEMPLATE,
                include_str!("../templates/container.go.jinja"),
            ),
            (
                ENTITY_TEMPLATE,
                include_str!("../templates/entity_container.go.jinja"),
            ),
            (ENGINE_TEMPLATE, include_str!("../templates/engine.go.jinja")),
        ];
        for (name, source) in sources {
            env.add_template(name, source)
                .map_err(|e| CodegenError::render(name, e))?;
        }

        Ok(Self { env })
    }

    fn template_for(layer: Layer) -> &'static str {
        match layer {
            Layer::Entity => ENTITY_TEMPLATE,
            _ => CONTAINER_TEMPLATE,
        }
    }

    /// Render `<layer>_container.go`
    pub fn render_layer(&self, layer: Layer, data: &TemplateData) -> Result<String> {
        self.render(Self::template_for(layer), data)
    }

    /// Render `engine.go`
    pub fn render_engine(&self, data: &EngineTemplateData) -> Result<String> {
        self.render(ENGINE_TEMPLATE, data)
    }

    fn render<S: serde::Serialize>(&self, name: &str, data: &S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| CodegenError::render(name, e))?;
        template
            .render(data)
            .map_err(|e| CodegenError::render(name, e))
    }
}
