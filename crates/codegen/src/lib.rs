//! # Litegen Codegen
//!
//! Renders dependency-injection container wiring for a discovered Go project.
//!
//! ## Output
//!
//! ```text
//! ProjectInfo
//!     │
//!     ├──> per layer: convert → sort → import table → render
//!     │      └─> <layer>_container.go  (Init<Layer>Container)
//!     │
//!     └──> engine.go  (NewEngine: every Init* in dependency order)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use litegen_codegen::ContainerBuilder;
//! use litegen_discovery::ProjectInfo;
//!
//! # fn main() -> Result<(), litegen_codegen::CodegenError> {
//! let info = ProjectInfo::new("example.com/app", "/path/to/project");
//! let builder = ContainerBuilder::new(
//!     "/path/to/project/internal/application",
//!     "application",
//!     "github.com/lite-lake/litecore-go",
//! )?;
//!
//! let report = builder.generate(&info)?;
//! println!("Wrote {} files", report.files.len());
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod imports;
mod model;
mod templates;

pub use builder::{ContainerBuilder, GenerationReport, LayerReport, ENGINE_FILE};
pub use error::{CodegenError, Result};
pub use imports::{package_alias, ImportResolver, ImportSpec};
pub use model::{
    config_driver, convert_components, init_dependencies, ComponentTemplateData,
    EngineTemplateData, TemplateData,
};
pub use templates::TemplateRenderer;
