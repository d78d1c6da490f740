//! # Litegen Go Syntax
//!
//! Declaration extraction for Go compilation units.
//!
//! ## Architecture
//!
//! ```text
//! Go source (*.go)
//!     │
//!     ├──> Tree-sitter Parsing → AST
//!     │      └─> ERROR / MISSING nodes → SyntaxError::ParseError
//!     │
//!     └──> Top-level declarations
//!          ├─> package clause
//!          ├─> type specs (struct / interface / other)
//!          └─> function declarations + result types
//! ```
//!
//! Only what component discovery needs is kept: no bodies, no methods, no imports.
//!
//! ## Example
//!
//! ```rust
//! use litegen_go_syntax::{GoAnalyzer, TypeShape};
//!
//! let mut analyzer = GoAnalyzer::new().unwrap();
//! let unit = analyzer
//!     .parse_str(
//!         "package services\n\ntype IUserService interface{}\n\nfunc NewUserService() IUserService { return nil }\n",
//!         "user_service.go",
//!     )
//!     .unwrap();
//!
//! assert_eq!(unit.package, "services");
//! assert_eq!(unit.types[0].shape, TypeShape::Interface);
//! assert!(unit.has_function("NewUserService"));
//! ```

mod analyzer;
mod error;
mod types;

pub use analyzer::{is_exported, GoAnalyzer};
pub use error::{Result, SyntaxError};
pub use types::{FuncDecl, ReturnType, SourceUnit, TypeDecl, TypeShape};
