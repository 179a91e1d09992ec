use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use mediadex::cli::OutputFormat;
use mediadex::config::Config;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("MEDIADEX_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_defaults() {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
store_root = "/srv/photos"
progress_interval = 25
follow_symlinks = true
output = "json"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path);

    assert_eq!(config.store_root, Some(PathBuf::from("/srv/photos")));
    assert_eq!(config.progress_interval, 25);
    assert!(config.follow_symlinks);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_env_overrides_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "progress_interval = 25\n").unwrap();

    std::env::set_var("MEDIADEX_PROGRESS_INTERVAL", "7");
    let config = Config::load_from_path(&path);
    clear_env();

    assert_eq!(config.progress_interval, 7);
}

#[test]
fn test_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    let config = Config::load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_toml_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "progress_interval = \"lots\"\n[[[").unwrap();

    let strict: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("MEDIADEX_"))
        .extract();
    assert!(strict.is_err());

    assert_eq!(Config::load_from_path(&path), Config::default());
}
