use crate::layer::Layer;
use std::path::{Component, Path};

/// One convention mapping a directory segment onto a layer
///
/// `rest` holds every segment after `segment`, the file name last.
pub trait LayerRule: Send + Sync {
    fn classify(&self, segment: &str, rest: &[&str]) -> Option<Layer>;
}

/// Matches a segment containing the layer's canonical directory name
pub struct DirectoryRule {
    needle: &'static str,
    layer: Layer,
}

impl DirectoryRule {
    pub fn new(needle: &'static str, layer: Layer) -> Self {
        Self { needle, layer }
    }

    pub fn for_layer(layer: Layer) -> Self {
        Self::new(layer.dir_name(), layer)
    }
}

impl LayerRule for DirectoryRule {
    fn classify(&self, segment: &str, _rest: &[&str]) -> Option<Layer> {
        segment.contains(self.needle).then_some(self.layer)
    }
}

/// Infrastructure area: configuration providers vs. managers
pub struct InfraRule;

impl InfraRule {
    const AREA: &'static str = "infras";
    const CONFIG_DIR: &'static str = "configproviders";
    const CONFIG_FILE: &'static str = "config_provider";
}

impl LayerRule for InfraRule {
    fn classify(&self, segment: &str, rest: &[&str]) -> Option<Layer> {
        if !segment.contains(Self::AREA) {
            return None;
        }

        let (file_name, dirs) = match rest.split_last() {
            Some((file_name, dirs)) => (*file_name, dirs),
            None => ("", rest),
        };

        let is_config = dirs.iter().any(|dir| dir.contains(Self::CONFIG_DIR))
            || file_name.contains(Self::CONFIG_FILE);

        Some(if is_config {
            Layer::Config
        } else {
            Layer::Manager
        })
    }
}

/// Ordered rule list; the first rule that answers for the leftmost segment wins
pub struct Classifier {
    rules: Vec<Box<dyn LayerRule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl Classifier {
    pub fn standard() -> Self {
        let mut rules: Vec<Box<dyn LayerRule>> = [
            Layer::Entity,
            Layer::Repository,
            Layer::Service,
            Layer::Controller,
            Layer::Middleware,
            Layer::Listener,
            Layer::Scheduler,
        ]
        .into_iter()
        .map(|layer| Box::new(DirectoryRule::for_layer(layer)) as Box<dyn LayerRule>)
        .collect();
        rules.push(Box::new(InfraRule));

        Self { rules }
    }

    pub fn with_rules(rules: Vec<Box<dyn LayerRule>>) -> Self {
        Self { rules }
    }

    /// Classify a path relative to the project root
    ///
    /// Only directory segments are matched; the file name is visible to rules through `rest`.
    pub fn classify(&self, relative: &Path) -> Option<Layer> {
        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let dir_count = segments.len().saturating_sub(1);
        for idx in 0..dir_count {
            let segment = segments[idx];
            let rest = &segments[idx + 1..];
            if let Some(layer) = self.rules.iter().find_map(|rule| rule.classify(segment, rest)) {
                return Some(layer);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(path: &str) -> Option<Layer> {
        Classifier::standard().classify(Path::new(path))
    }

    #[test]
    fn test_directory_layers() {
        assert_eq!(classify("internal/entities/user.go"), Some(Layer::Entity));
        assert_eq!(
            classify("internal/repositories/sub/user_repo.go"),
            Some(Layer::Repository)
        );
        assert_eq!(classify("internal/services/user.go"), Some(Layer::Service));
        assert_eq!(
            classify("internal/controllers/user.go"),
            Some(Layer::Controller)
        );
        assert_eq!(
            classify("internal/middlewares/auth.go"),
            Some(Layer::Middleware)
        );
        assert_eq!(classify("internal/listeners/l.go"), Some(Layer::Listener));
        assert_eq!(classify("internal/schedulers/s.go"), Some(Layer::Scheduler));
    }

    #[test]
    fn test_infra_split() {
        assert_eq!(
            classify("internal/infras/configproviders/provider.go"),
            Some(Layer::Config)
        );
        assert_eq!(
            classify("internal/infras/app_config_provider.go"),
            Some(Layer::Config)
        );
        assert_eq!(
            classify("internal/infras/managers/db.go"),
            Some(Layer::Manager)
        );
        assert_eq!(classify("internal/infras/cache.go"), Some(Layer::Manager));
    }

    #[test]
    fn test_leftmost_segment_wins() {
        assert_eq!(
            classify("internal/services/entities/helper.go"),
            Some(Layer::Service)
        );
    }

    #[test]
    fn test_unrecognized_and_file_names() {
        assert_eq!(classify("internal/application/engine.go"), None);
        assert_eq!(classify("cmd/server/main.go"), None);
        assert_eq!(classify("services.go"), None);
    }

    #[test]
    fn test_custom_rules() {
        let classifier =
            Classifier::with_rules(vec![Box::new(DirectoryRule::new("handlers", Layer::Controller))]);
        assert_eq!(
            classifier.classify(Path::new("internal/handlers/h.go")),
            Some(Layer::Controller)
        );
        assert_eq!(classifier.classify(Path::new("internal/services/s.go")), None);
    }
}
