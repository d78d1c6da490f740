use crate::error::{Result, SyntaxError};
use crate::types::{FuncDecl, ReturnType, SourceUnit, TypeDecl, TypeShape};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Tree-sitter based analyzer that extracts top-level declarations from Go sources.
///
/// One analyzer owns one parser and can be reused for any number of files, but it is
/// not `Sync`: concurrent callers each build their own.
pub struct GoAnalyzer {
    parser: Parser,
}

impl GoAnalyzer {
    /// Create new analyzer bound to the Go grammar
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| SyntaxError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    /// Read and parse a file from disk
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<SourceUnit> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SyntaxError::io(path, e))?;
        self.parse_str(&content, path)
    }

    /// Parse source text; `path` is only used for diagnostics and the returned unit
    pub fn parse_str(&mut self, content: &str, path: impl AsRef<Path>) -> Result<SourceUnit> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| SyntaxError::parse(&display, 1, 1, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Self::describe_error(&display, content, root));
        }

        let mut unit = SourceUnit {
            path: path.to_path_buf(),
            ..SourceUnit::default()
        };
        let mut package = None;

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => package = Self::package_name(content, child),
                "type_declaration" => Self::collect_type_specs(content, child, &mut unit.types),
                "function_declaration" => {
                    if let Some(func) = Self::function_decl(content, child) {
                        unit.functions.push(func);
                    }
                }
                // Methods, imports, vars and consts carry no component information
                _ => {}
            }
        }

        unit.package = package.ok_or(SyntaxError::MissingPackage(display))?;

        log::trace!(
            "Parsed {}: package {}, {} types, {} functions",
            path.display(),
            unit.package,
            unit.types.len(),
            unit.functions.len()
        );

        Ok(unit)
    }

    fn package_name(content: &str, clause: Node) -> Option<String> {
        let mut cursor = clause.walk();
        let name = clause
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_identifier")
            .map(|child| node_text(content, child).to_string());
        name
    }

    /// Handles both `type X struct{}` and grouped `type ( ... )` declarations
    fn collect_type_specs(content: &str, decl: Node, out: &mut Vec<TypeDecl>) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            let is_alias = match spec.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };

            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(content, name_node).to_string();

            let shape = if is_alias {
                TypeShape::Other
            } else {
                spec.child_by_field_name("type")
                    .map(|ty| TypeShape::from_node_kind(ty.kind()))
                    .unwrap_or(TypeShape::Other)
            };

            out.push(TypeDecl {
                exported: is_exported(&name),
                name,
                shape,
                line: spec.start_position().row + 1,
            });
        }
    }

    fn function_decl(content: &str, node: Node) -> Option<FuncDecl> {
        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(content, n).to_string())?;

        let results = match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(result) if result.kind() == "parameter_list" => {
                Self::result_list(content, result)
            }
            Some(result) => vec![Self::return_type(content, result)],
        };

        Some(FuncDecl {
            name,
            results,
            line: node.start_position().row + 1,
        })
    }

    /// Parenthesized results: `(T, error)` or named `(a, b int)`
    fn result_list(content: &str, list: Node) -> Vec<ReturnType> {
        let mut results = Vec::new();
        let mut cursor = list.walk();

        for param in list.named_children(&mut cursor) {
            if !matches!(
                param.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            ) {
                continue;
            }
            let Some(ty) = param.child_by_field_name("type") else {
                continue;
            };

            let return_type = Self::return_type(content, ty);
            let mut name_cursor = param.walk();
            let values = param
                .children_by_field_name("name", &mut name_cursor)
                .count()
                .max(1);
            results.extend(std::iter::repeat(return_type).take(values));
        }

        results
    }

    fn return_type(content: &str, node: Node) -> ReturnType {
        let (target, pointer) = match node.kind() {
            "pointer_type" => match node.named_child(0) {
                Some(inner) => (inner, true),
                None => (node, false),
            },
            _ => (node, false),
        };

        match target.kind() {
            "type_identifier" => ReturnType::Named {
                name: node_text(content, target).to_string(),
                pointer,
            },
            "qualified_type" => {
                let package = target
                    .child_by_field_name("package")
                    .map(|n| node_text(content, n).to_string());
                let member = target
                    .child_by_field_name("name")
                    .map(|n| node_text(content, n).to_string());

                match (package, member) {
                    (Some(package), Some(member)) => ReturnType::Qualified {
                        package,
                        member,
                        pointer,
                    },
                    _ => ReturnType::Other {
                        text: node_text(content, node).to_string(),
                    },
                }
            }
            _ => ReturnType::Other {
                text: node_text(content, node).to_string(),
            },
        }
    }

    fn describe_error(path: &str, content: &str, root: Node) -> SyntaxError {
        let node = first_error_node(root).unwrap_or(root);
        let pos = node.start_position();
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let snippet: String = node_text(content, node)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .chars()
                .take(40)
                .collect();
            if snippet.is_empty() {
                "unexpected syntax".to_string()
            } else {
                format!("unexpected syntax near `{snippet}`")
            }
        };

        SyntaxError::parse(path, pos.row + 1, pos.column + 1, message)
    }
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_node)
}

fn node_text<'a>(content: &'a str, node: Node) -> &'a str {
    &content[node.start_byte()..node.end_byte()]
}

/// Go exports identifiers that start with an upper-case letter
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
