//! Test-method naming conventions.
//!
//! Follows Laravel's `Str::snake` / `Str::studly` / `Str::camel` rules so
//! generated names match what PHP projects already use.

use smith_config::MethodFormat;

/// Prefix every test method carries after normalization.
pub const TEST_MARKER: &str = "test";

/// Suffix appended to a declaration name to form its test class name.
pub const TEST_CLASS_SUFFIX: &str = "Test";

/// Test method name for source method `method`.
///
/// `fooBar` becomes `test_foo_bar` (snake) or `testFooBar` (camel).
#[must_use]
pub fn test_method_name(method: &str, format: MethodFormat) -> String {
    normalize(&format!("{TEST_MARKER}_{}", snake_case(method)), format)
}

/// Rewrite an existing method name into `format`.
#[must_use]
pub fn normalize(name: &str, format: MethodFormat) -> String {
    match format {
        MethodFormat::Snake => snake_case(name),
        MethodFormat::Camel => camel_case(name),
    }
}

/// Whether a normalized name denotes a test method.
#[must_use]
pub fn is_test_name(normalized: &str) -> bool {
    normalized.starts_with(TEST_MARKER)
}

/// `fooBar` -> `foo_bar`. All-lowercase input is returned unchanged.
#[must_use]
pub fn snake_case(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_lowercase()) {
        return value.to_string();
    }

    let joined: String = value.split_whitespace().map(upper_first).collect();
    let mut out = String::with_capacity(joined.len() + 4);
    for (i, c) in joined.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// `foo_bar-baz qux` -> `FooBarBazQux`.
#[must_use]
pub fn pascal_case(value: &str) -> String {
    value
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .map(upper_first)
        .collect()
}

/// `foo_bar` -> `fooBar`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    let pascal = pascal_case(value);
    let mut chars = pascal.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
