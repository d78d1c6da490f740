//! # Litegen Discovery
//!
//! Convention-based component discovery for layered Go projects.
//!
//! ## Pipeline
//!
//! ```text
//! <project>/internal
//!     │
//!     ├──> Source Scanner (*.go, no _test.go)
//!     │      └─> Files per source area
//!     │
//!     ├──> Classifier (directory conventions)
//!     │      └─> Layer per file
//!     │
//!     ├──> Discovery Strategy (type-first / function-first)
//!     │      └─> ComponentInfo per capability or constructor
//!     │
//!     └──> Factory Resolver (sibling files)
//!            └─> ProjectInfo
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use litegen_discovery::{read_module_name, FactoryResolver, GenerationContext, ProjectAnalyzer};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new("/path/to/project");
//! let module = read_module_name(root)?;
//! let analyzer = ProjectAnalyzer::new(GenerationContext::new(module, root));
//!
//! let mut info = analyzer.analyze()?;
//! FactoryResolver::new()?.fill_missing(&mut info);
//! println!("Discovered {} components", info.total());
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod classifier;
mod error;
mod factory;
mod layer;
mod manifest;
mod model;
mod scanner;
mod strategy;

pub use analyzer::{GenerationContext, ProjectAnalyzer, SourceArea, SOURCE_ROOT};
pub use classifier::{Classifier, DirectoryRule, InfraRule, LayerRule};
pub use error::{DiscoveryError, ManifestError, Result};
pub use factory::FactoryResolver;
pub use layer::Layer;
pub use manifest::{parse_module_name, read_module_name, MANIFEST_FILE};
pub use model::{ComponentInfo, ProjectInfo};
pub use scanner::SourceScanner;
pub use strategy::{
    factory_name_for, is_capability_name, strip_capability_prefix, DiscoveryStrategy, UnitOrigin,
};
