//! CLI integration tests
//!
//! Commands that never reach the network: config generation, logout and
//! the logged-out guard.

use linkkeep::cli::{Commands, ConfigCommands};
use linkkeep::config::{StaticConfig, StorageConfig};
use linkkeep::interfaces::cli::{CliContext, CliError, run_cli_command};
use linkkeep::storage::{CredentialStore, FileCredentialStore};
use tempfile::TempDir;

fn offline_config(dir: &TempDir) -> StaticConfig {
    let mut config = StaticConfig::default();
    // 不可达端口，任何网络请求都会失败
    config.api.base_url = "http://127.0.0.1:9".to_string();
    config.api.timeout_secs = 1;
    config.storage = StorageConfig {
        credential_dir: dir.path().join("creds"),
        credential_key: "token".to_string(),
    };
    config
}

#[tokio::test]
async fn test_config_generate_writes_loadable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linkkeep.toml");

    run_cli_command(
        Commands::Config {
            action: ConfigCommands::Generate {
                output_path: Some(path.to_string_lossy().into_owned()),
                force: true,
            },
        },
        StaticConfig::default(),
    )
    .await
    .unwrap();

    let loaded = StaticConfig::load_from(&path).unwrap();
    assert_eq!(loaded.api.timeout_secs, StaticConfig::default().api.timeout_secs);
}

#[tokio::test]
async fn test_logout_removes_credential_without_network() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);
    let store = FileCredentialStore::from_config(&config.storage);
    store.save("stale").unwrap();

    run_cli_command(Commands::Logout, config).await.unwrap();

    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_link_commands_require_login() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    let err = run_cli_command(Commands::List { search: None }, config)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::NotLoggedIn));
}

#[tokio::test]
async fn test_context_is_anonymous_before_recovery() {
    let dir = TempDir::new().unwrap();
    let ctx = CliContext::new(offline_config(&dir));
    assert!(ctx.session.is_loading());
    assert!(matches!(ctx.links(), Err(CliError::NotLoggedIn)));
}
