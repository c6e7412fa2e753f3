use crate::commands::schema_args::parse_model_class;
use crate::commands::schema_args::SchemaArgs;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
struct TestArgs {
    #[command(flatten)]
    schema: SchemaArgs,
}

fn schema_args(args: &[&str]) -> SchemaArgs {
    TestArgs::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
        .unwrap()
        .schema
}

fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "sdl-cli-{}-{test_name}",
        std::process::id(),
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =========================================================================
// Model classes
// =========================================================================

#[test]
fn model_class_forms() {
    assert_eq!(
        parse_model_class("User").unwrap(),
        ("User".to_string(), "User".to_string()),
    );
    assert_eq!(
        parse_model_class("User=App\\Models\\User").unwrap(),
        ("User".to_string(), "App\\Models\\User".to_string()),
    );
    assert!(parse_model_class("=App\\User").is_err());
    assert!(parse_model_class("User=").is_err());
}

#[test]
fn registry_from_flags_and_file() {
    let dir = scratch_dir("registry");
    let class_file = dir.join("classes.txt");
    std::fs::write(&class_file, "# models\nPost\n\nComment=App\\Comment\n").unwrap();

    let args = schema_args(&[
        "--model-class", "User",
        "--model-class-file", class_file.to_str().unwrap(),
        "schema.graphql",
    ]);
    assert!(args.has_model_classes());
    let registry = args.class_registry().unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry["Comment"], "App\\Comment");
    assert_eq!(registry["Post"], "Post");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn bad_line_in_class_file_names_line() {
    let dir = scratch_dir("bad-line");
    let class_file = dir.join("classes.txt");
    std::fs::write(&class_file, "User\n=Broken\n").unwrap();

    let args = schema_args(&["--model-class-file", class_file.to_str().unwrap(), "x"]);
    let err = args.class_registry().unwrap_err();
    assert!(format!("{err:#}").contains("classes.txt:2"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn binding_options_from_flags() {
    let args = schema_args(&["x"]);
    assert_eq!(args.binding_options(), sdl_document::BindingOptions::default());
    assert!(!args.has_model_classes());

    let args = schema_args(&["--binding-directive", "entity", "--binding-argument", "name", "x"]);
    assert_eq!(args.binding_options().directive_name, "entity");
    assert_eq!(args.binding_options().class_argument, "name");
}

// =========================================================================
// File discovery and loading
// =========================================================================

#[test]
fn finds_files_by_extension() {
    let dir = scratch_dir("find");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("a.graphql"), "type A { a: Int }").unwrap();
    std::fs::write(dir.join("nested/b.graphqls"), "type B { b: Int }").unwrap();
    std::fs::write(dir.join("notes.txt"), "not sdl").unwrap();

    let args = schema_args(&[dir.to_str().unwrap()]);
    let found = args.find_files().unwrap();
    assert_eq!(found.file_paths.len(), 2);
    assert_eq!(found.num_skipped, 1);

    let args = schema_args(&["--graphql-file-exts", "txt", dir.to_str().unwrap()]);
    assert_eq!(args.find_files().unwrap().file_paths.len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

/// A lone file argument is loaded whatever its extension.
#[test]
fn single_file_with_other_extension() {
    let dir = scratch_dir("single");
    let path = dir.join("schema.sdl");
    std::fs::write(&path, "type A { a: Int }").unwrap();

    let args = schema_args(&[path.to_str().unwrap()]);
    let found = args.find_files().unwrap();
    assert_eq!(found.file_paths.len(), 1);
    assert_eq!(found.num_skipped, 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_document_merges_under_binding_options() {
    let dir = scratch_dir("load");
    std::fs::write(dir.join("a.graphql"), "type A @entity(name: \"Acct\") { a: Int }").unwrap();
    std::fs::write(dir.join("b.graphql"), "type A { b: Int }\ntype B @entity(name: \"B\") { b: Int }").unwrap();

    let args = schema_args(&["--binding-directive", "entity", "--binding-argument", "name", dir.to_str().unwrap()]);
    let found = args.find_files().unwrap();
    let document = args.load_document(&found.file_paths).unwrap();
    assert_eq!(document.types()["A"].fields()[0].name, "b");
    assert_eq!(document.type_name_for_class("B"), Some("B"));
    assert_eq!(document.type_name_for_class("Acct"), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_document_renders_syntax_errors() {
    let dir = scratch_dir("syntax");
    let path = dir.join("broken.graphql");
    std::fs::write(&path, "type Query {\n  foo: Int!!\n}").unwrap();

    let args = schema_args(&[path.to_str().unwrap()]);
    let found = args.find_files().unwrap();
    let err = args.load_document(&found.file_paths).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("broken.graphql"));
    assert!(rendered.contains("foo: Int!!"));

    std::fs::remove_dir_all(&dir).unwrap();
}
