use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::rstest;
use smith_parser::{
    DeclarationKind, extract_declarations, parse_file, parse_source, print_preserving,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[rstest]
#[case("Billing.php")]
#[case("BillingTest.php")]
#[case("ExampleTest.php")]
fn fixtures_reprint_byte_for_byte(#[case] name: &str) {
    let path = fixture(name);
    let tree = parse_file(&path).expect("fixture parses");
    let expected = std::fs::read_to_string(&path).expect("fixture readable");
    assert_eq!(print_preserving(&tree.clone(), &tree), expected);
}

#[test]
fn existing_test_class_methods_are_listed() {
    let tree = parse_file(&fixture("BillingTest.php")).expect("fixture parses");
    let declarations = extract_declarations(&tree);

    assert_eq!(declarations.len(), 1);
    let class = &declarations[0];
    assert_eq!(class.kind, DeclarationKind::Class);
    assert_eq!(class.qualified_name(), "Tests\\Unit\\Services\\BillingTest");
    let names: Vec<&str> = class.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["test_charge"]);
}

#[test]
fn template_has_one_empty_class() {
    let tree = parse_file(&fixture("ExampleTest.php")).expect("fixture parses");
    let declarations = extract_declarations(&tree);

    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].name, "ExampleTest");
    assert_eq!(declarations[0].namespace.as_deref(), Some("Tests\\Unit"));
    assert!(declarations[0].methods.is_empty());
}

#[test]
fn classes_inside_html_templates_are_found() {
    let source = "<html>\n<?php\nnamespace App\\Views;\n\nclass Page\n{\n    \
                  public function render() {}\n}\n?>\n<footer>done</footer>\n";
    let tree = parse_source(source, "Page.php").expect("template parses");
    let declarations = extract_declarations(&tree);

    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].qualified_name(), "App\\Views\\Page");
    assert_eq!(print_preserving(&tree.clone(), &tree), source);
}

#[test]
fn deeply_nested_expressions_stay_on_a_small_stack() {
    let links = 10_000;
    let chain = vec!["'x'"; links].join(" . ");
    let source = format!(
        "<?php\nclass Big\n{{\n    public function s()\n    {{\n        return {chain};\n    }}\n}}\n"
    );

    // Worker threads in parallel mode get 2 MiB stacks.
    let worker = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let tree = parse_source(&source, "Big.php").expect("parses");
            let declarations = extract_declarations(&tree);
            let printed = print_preserving(&tree.clone(), &tree);
            (declarations.len(), printed == source)
        })
        .expect("thread spawns");

    let (classes, lossless) = worker.join().expect("no stack overflow");
    assert_eq!(classes, 1);
    assert!(lossless);
}
