//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use smith_config::{ConfigOverrides, MethodFormat, SmithConfig, TargetOverrides};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[source]
base = "src"
roots = ["src/Domain"]
exclude = ["Generated"]
extension = "php"

[target]
namespace = "App\\Tests"
directory = "tests/Domain"
template = "stubs/TestCase.php"
method_format = "camel"

[general]
dry_run = true
"#,
        )?;

        let config: SmithConfig = Figment::from(Serialized::defaults(SmithConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.source.base, "src");
        assert_eq!(config.source.roots, vec!["src/Domain".to_string()]);
        assert_eq!(config.source.exclude, vec!["Generated".to_string()]);
        assert_eq!(config.target.namespace, "App\\Tests");
        assert_eq!(config.target.directory, "tests/Domain");
        assert_eq!(config.target.template, "stubs/TestCase.php");
        assert_eq!(config.target.method_format, MethodFormat::Camel);
        assert!(config.general.dry_run);
        assert!(!config.general.parallel);
        Ok(())
    });
}

#[test]
fn project_file_is_discovered_in_project_root() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "testsmith.toml",
            r#"
[target]
namespace = "Tests\\Feature\\"
"#,
        )?;

        let config = SmithConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.target.namespace, "Tests\\Feature");
        assert_eq!(config.source.base, "app");
        Ok(())
    });
}

#[test]
fn explicit_config_file_replaces_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("testsmith.toml", "[source]\nbase = \"ignored\"\n")?;
        jail.create_file("custom.toml", "[source]\nbase = \"lib\"\n")?;

        let config = SmithConfig::load_with_overrides(
            jail.directory(),
            Some(std::path::Path::new("custom.toml")),
            &ConfigOverrides::default(),
        )
        .expect("config loads");
        assert_eq!(config.source.base, "lib");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("testsmith.toml", "[target]\nmethod_format = \"snake\"\n")?;
        jail.set_env("TESTSMITH_TARGET__METHOD_FORMAT", "camel");

        let config = SmithConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.target.method_format, MethodFormat::Camel);
        Ok(())
    });
}

#[test]
fn overrides_beat_env() {
    Jail::expect_with(|jail| {
        jail.set_env("TESTSMITH_TARGET__DIRECTORY", "tests/FromEnv");

        let overrides = ConfigOverrides {
            target: TargetOverrides {
                directory: Some("tests/FromFlag".to_string()),
                ..TargetOverrides::default()
            },
            ..ConfigOverrides::default()
        };
        let config = SmithConfig::load_with_overrides(jail.directory(), None, &overrides)
            .expect("config loads");
        assert_eq!(config.target.directory, "tests/FromFlag");
        Ok(())
    });
}

#[test]
fn unset_overrides_leave_lower_layers_alone() {
    Jail::expect_with(|jail| {
        jail.create_file("testsmith.toml", "[general]\nparallel = true\n")?;

        let config =
            SmithConfig::load_with_overrides(jail.directory(), None, &ConfigOverrides::default())
                .expect("config loads");
        assert!(config.general.parallel);
        Ok(())
    });
}

#[test]
fn unknown_method_format_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("testsmith.toml", "[target]\nmethod_format = \"kebab\"\n")?;

        let result = SmithConfig::load(jail.directory());
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn empty_extension_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("testsmith.toml", "[source]\nextension = \".\"\n")?;

        let error = SmithConfig::load(jail.directory()).expect_err("validation fails");
        assert!(error.to_string().contains("source.extension"));
        Ok(())
    });
}
