use crate::strategy::DiscoveryStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architectural role of a discovered component
///
/// Declaration order is the render order of the generated containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Config,
    Entity,
    Manager,
    Repository,
    Service,
    Controller,
    Middleware,
    Listener,
    Scheduler,
}

impl Layer {
    pub const ALL: [Layer; 9] = [
        Layer::Config,
        Layer::Entity,
        Layer::Manager,
        Layer::Repository,
        Layer::Service,
        Layer::Controller,
        Layer::Middleware,
        Layer::Listener,
        Layer::Scheduler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Config => "config",
            Layer::Entity => "entity",
            Layer::Manager => "manager",
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Controller => "controller",
            Layer::Middleware => "middleware",
            Layer::Listener => "listener",
            Layer::Scheduler => "scheduler",
        }
    }

    /// Directory under `internal/` holding this layer's sources
    pub fn dir_name(self) -> &'static str {
        match self {
            Layer::Config | Layer::Manager => "infras",
            Layer::Entity => "entities",
            Layer::Repository => "repositories",
            Layer::Service => "services",
            Layer::Controller => "controllers",
            Layer::Middleware => "middlewares",
            Layer::Listener => "listeners",
            Layer::Scheduler => "schedulers",
        }
    }

    /// Capitalized form used in generated identifiers (`Repository`, `Config`, ...)
    pub fn title(self) -> &'static str {
        match self {
            Layer::Config => "Config",
            Layer::Entity => "Entity",
            Layer::Manager => "Manager",
            Layer::Repository => "Repository",
            Layer::Service => "Service",
            Layer::Controller => "Controller",
            Layer::Middleware => "Middleware",
            Layer::Listener => "Listener",
            Layer::Scheduler => "Scheduler",
        }
    }

    pub fn container_name(self) -> String {
        format!("{}Container", self.title())
    }

    pub fn init_fn(self) -> String {
        format!("Init{}Container", self.title())
    }

    pub fn register_fn(self) -> String {
        format!("Register{}", self.title())
    }

    /// Framework base type every component of the layer builds on
    pub fn base_type(self) -> &'static str {
        match self {
            Layer::Config => "common.IBaseConfigProvider",
            Layer::Entity => "common.BaseEntity",
            Layer::Manager => "common.IBaseManager",
            Layer::Repository => "common.BaseRepository",
            Layer::Service => "common.IBaseService",
            Layer::Controller => "common.IBaseController",
            Layer::Middleware => "common.IBaseMiddleware",
            Layer::Listener => "common.IBaseListener",
            Layer::Scheduler => "common.IBaseScheduler",
        }
    }

    /// Output file name without extension
    pub fn file_stem(self) -> String {
        format!("{}_container", self.as_str())
    }

    pub fn strategy(self) -> DiscoveryStrategy {
        match self {
            Layer::Config | Layer::Manager => DiscoveryStrategy::FunctionFirst,
            _ => DiscoveryStrategy::TypeFirst,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_naming_tables() {
        assert_eq!(Layer::Repository.container_name(), "RepositoryContainer");
        assert_eq!(Layer::Repository.register_fn(), "RegisterRepository");
        assert_eq!(Layer::Repository.init_fn(), "InitRepositoryContainer");
        assert_eq!(Layer::Entity.file_stem(), "entity_container");
        assert_eq!(Layer::Service.base_type(), "common.IBaseService");
        assert_eq!(Layer::Config.base_type(), "common.IBaseConfigProvider");
        assert_eq!(Layer::Manager.dir_name(), "infras");
    }

    #[test]
    fn test_order_follows_render_order() {
        let mut shuffled = vec![Layer::Scheduler, Layer::Entity, Layer::Config, Layer::Service];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Layer::Config, Layer::Entity, Layer::Service, Layer::Scheduler]
        );
        assert_eq!(Layer::ALL.first(), Some(&Layer::Config));
    }

    #[test]
    fn test_strategies() {
        assert_eq!(Layer::Config.strategy(), DiscoveryStrategy::FunctionFirst);
        assert_eq!(Layer::Manager.strategy(), DiscoveryStrategy::FunctionFirst);
        assert_eq!(Layer::Entity.strategy(), DiscoveryStrategy::TypeFirst);
        assert_eq!(Layer::Listener.strategy(), DiscoveryStrategy::TypeFirst);
    }
}
