use figment::Jail;
use pretty_assertions::assert_eq;
use scaf_config::{ConfigError, ScafConfig};

fn isolate_global(jail: &mut Jail) {
    let config_home = jail.directory().join("xdg");
    jail.set_env("XDG_CONFIG_HOME", config_home.display());
}

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        isolate_global(jail);
        jail.create_dir(".scaf")?;
        jail.create_file(
            ".scaf/config.toml",
            r#"
            [paths]
            models_dir = "src/Domain/Models"

            [namespaces]
            models = 'Domain\Models'

            [migration]
            strict = false
            "#,
        )?;

        let config = ScafConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.paths.models_dir, "src/Domain/Models");
        assert_eq!(config.namespaces.models, r"Domain\Models");
        assert!(!config.migration.strict);
        // untouched values keep their defaults
        assert!(config.migration.create_missing);
        assert_eq!(config.paths.routes_file, "routes/web.php");
        Ok(())
    });
}

#[test]
fn global_toml_is_layered_under_project_toml() {
    Jail::expect_with(|jail| {
        isolate_global(jail);
        jail.create_dir("xdg/scaf")?;
        jail.create_file(
            "xdg/scaf/config.toml",
            r#"
            [layout]
            brand = "Backoffice"
            title = "ops"
            "#,
        )?;
        jail.create_dir(".scaf")?;
        jail.create_file(
            ".scaf/config.toml",
            r#"
            [layout]
            title = "project"
            "#,
        )?;

        let config = ScafConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.layout.brand, "Backoffice");
        assert_eq!(config.layout.title, "project");
        Ok(())
    });
}

#[test]
fn missing_files_yield_defaults() {
    Jail::expect_with(|jail| {
        isolate_global(jail);
        let config = ScafConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config, ScafConfig::default());
        Ok(())
    });
}

#[test]
fn invalid_path_in_toml_is_rejected() {
    Jail::expect_with(|jail| {
        isolate_global(jail);
        jail.create_dir(".scaf")?;
        jail.create_file(
            ".scaf/config.toml",
            r#"
            [paths]
            controllers_dir = "../outside"
            "#,
        )?;

        let err = ScafConfig::load(jail.directory()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        isolate_global(jail);
        jail.create_dir(".scaf")?;
        jail.create_file(".scaf/config.toml", "[paths\nmodels_dir = ")?;

        let err = ScafConfig::load(jail.directory()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
