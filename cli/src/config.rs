// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use tokio::fs;

use davcheck_core::{APP_NAME, Config};

const DAVCHECK_CONFIG_ENV: &str = "DAVCHECK_CONFIG";

/// Loads the configuration from `--config`, `DAVCHECK_CONFIG`, or the user
/// config directory, in that order.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(DAVCHECK_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?;
    let config = parse_content(&content)
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?;
    Ok(config)
}

fn parse_content(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.normalize();
    Ok(config)
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn write_config(dir: &TempDir, name: &str, base_url: &str) -> PathBuf {
        let path = dir.path().join(name);
        let content = format!(
            r#"
[server]
base_url = "{base_url}"

[users.alice]
password = "secret"
"#
        );
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_and_normalizes() {
        let config = parse_content(
            r#"
admin = "admin"

[server]
base_url = "https://cloud.example.com/"
dav_path_version = 3

[users.admin]
password = "admin"
space_id = "abc"
"#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://cloud.example.com");
        assert_eq!(config.admin.as_deref(), Some("admin"));
        assert_eq!(config.users["admin"].space_id.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_missing_server() {
        assert!(parse_content("[users.alice]\npassword = \"x\"\n").is_err());
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let cli_path = write_config(&temp_dir, "cli.toml", "https://cli.example.com");
        let env_path = write_config(&temp_dir, "env.toml", "https://env.example.com");

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(DAVCHECK_CONFIG_ENV, env_path.to_str().unwrap());
        }

        let config = parse_config(Some(cli_path)).await.unwrap();
        assert_eq!(config.server.base_url, "https://cli.example.com");

        unsafe {
            std::env::remove_var(DAVCHECK_CONFIG_ENV);
        }
    }

    #[tokio::test]
    async fn env_var_overrides_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = write_config(&temp_dir, "env.toml", "https://env.example.com");

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(DAVCHECK_CONFIG_ENV, env_path.to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();
        assert_eq!(config.server.base_url, "https://env.example.com");

        unsafe {
            std::env::remove_var(DAVCHECK_CONFIG_ENV);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn uses_default_when_no_cli_or_env() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(APP_NAME)).unwrap();
        write_config(
            &temp_dir,
            &format!("{APP_NAME}/config.toml"),
            "https://default.example.com",
        );

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(DAVCHECK_CONFIG_ENV);
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();
        assert_eq!(config.server.base_url, "https://default.example.com");

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn returns_error_when_no_config_found() {
        let temp_dir = TempDir::new().unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(DAVCHECK_CONFIG_ENV);
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap());
        }

        let result = parse_config(None).await;
        assert!(result.is_err());

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[tokio::test]
    async fn reports_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = parse_config(Some(temp_dir.path().join("missing.toml")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
