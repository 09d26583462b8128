use gql_faker::config::Settings;
use gql_faker::domain::Locale;
use gql_faker::StdFaker;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

// Settings read the process environment, so tests touching it run one at a time
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new()?;

    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;
    assert_eq!(settings.faker.default_locale, Locale::En);
    Ok(())
}

#[test]
fn test_load_toml_config() -> anyhow::Result<()> {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(
        root.join("gql-faker.toml"),
        r#"
[faker]
default_locale = "fr"
"#,
    )?;

    let settings = Settings::from_root(root.to_str().unwrap())?;
    assert_eq!(settings.faker.default_locale, Locale::Fr);
    assert_eq!(StdFaker::from_settings(&settings.faker).default_locale(), Locale::Fr);
    Ok(())
}

#[test]
fn test_load_yaml_config() -> anyhow::Result<()> {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(root.join("gql-faker.yaml"), "faker:\n  default_locale: zh_TW\n")?;

    let settings = Settings::from_root(root.to_str().unwrap())?;
    assert_eq!(settings.faker.default_locale, Locale::ZhTw);
    Ok(())
}

#[test]
fn test_environment_overrides_file() -> anyhow::Result<()> {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::write(root.join("gql-faker.toml"), "[faker]\ndefault_locale = \"fr\"\n")?;

    std::env::set_var("GQL_FAKER__FAKER__DEFAULT_LOCALE", "ja");
    let settings = Settings::from_root(root.to_str().unwrap());
    std::env::remove_var("GQL_FAKER__FAKER__DEFAULT_LOCALE");

    assert_eq!(settings?.faker.default_locale, Locale::Ja);
    Ok(())
}

#[test]
fn test_unknown_locale_is_rejected() -> anyhow::Result<()> {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::write(root.join("gql-faker.toml"), "[faker]\ndefault_locale = \"klingon\"\n")?;

    let result = Settings::from_root(root.to_str().unwrap());
    assert!(result.is_err());
    Ok(())
}
