use litegen_go_syntax::{GoAnalyzer, ReturnType, SyntaxError, TypeShape};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn parses_repository_unit_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("user_repository.go");
    fs::write(
        &path,
        r#"package repositories

import (
    "example.com/app/internal/entities"
)

type IUserRepository interface {
    FindByID(id int64) (*entities.User, error)
}

type userRepositoryImpl struct{}

func NewUserRepository() IUserRepository {
    return &userRepositoryImpl{}
}

func (r *userRepositoryImpl) FindByID(id int64) (*entities.User, error) {
    return nil, nil
}
"#,
    )
    .unwrap();

    let mut analyzer = GoAnalyzer::new().expect("analyzer");
    let unit = analyzer.parse_file(&path).expect("parse");

    assert_eq!(unit.path, path);
    assert_eq!(unit.package, "repositories");

    let interfaces: Vec<_> = unit.interfaces().map(|t| t.name.as_str()).collect();
    assert_eq!(interfaces, vec!["IUserRepository"]);
    let structs: Vec<_> = unit.structs().map(|t| t.name.as_str()).collect();
    assert_eq!(structs, vec!["userRepositoryImpl"]);

    let factory = unit.function("NewUserRepository").expect("factory");
    assert!(factory.returns_single_value());
    assert_eq!(
        factory.results[0],
        ReturnType::Named {
            name: "IUserRepository".to_string(),
            pointer: false
        }
    );
    assert_eq!(unit.functions.len(), 1);
}

#[test]
fn generic_type_declarations_are_captured() {
    let mut analyzer = GoAnalyzer::new().unwrap();
    let unit = analyzer
        .parse_str(
            "package entities\n\ntype Page[T any] struct {\n    Items []T\n}\n",
            "page.go",
        )
        .unwrap();

    assert_eq!(unit.types.len(), 1);
    assert_eq!(unit.types[0].name, "Page");
    assert_eq!(unit.types[0].shape, TypeShape::Struct);
}

#[test]
fn analyzer_is_reusable_after_a_parse_error() {
    let mut analyzer = GoAnalyzer::new().unwrap();

    let err = analyzer
        .parse_str("package broken\n\ntype X struct {\n", "broken.go")
        .unwrap_err();
    match err {
        SyntaxError::ParseError { path, line, .. } => {
            assert_eq!(path, "broken.go");
            assert!(line >= 1);
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    let unit = analyzer
        .parse_str("package fine\n", "fine.go")
        .expect("second parse");
    assert_eq!(unit.package, "fine");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = tempdir().unwrap();
    let mut analyzer = GoAnalyzer::new().unwrap();

    let err = analyzer
        .parse_file(temp.path().join("absent.go"))
        .unwrap_err();
    assert!(matches!(err, SyntaxError::IoError { .. }));
    assert!(!err.is_parse_error());
}
