use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkKeepError, Result};

/// 单独的 API 地址环境变量，优先级最高
pub const API_URL_ENV: &str = "LINKKEEP_API_URL";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - api: 远程 API 地址、超时、快速链接端点
/// - storage: 凭证存储位置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：LINKKEEP_API_URL > ENV > linkkeep.toml > 默认值
    /// ENV 前缀：LINKKEEP，分隔符：__
    /// 示例：LINKKEEP__API__TIMEOUT_SECS=5
    pub fn load() -> Result<Self> {
        Self::load_from("linkkeep.toml")
    }

    pub fn load_from<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("LINKKEEP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: StaticConfig = settings.try_deserialize()?;
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            config.api.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            LinkKeepError::config(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(LinkKeepError::config(format!(
                "api.base_url must be http(s), got '{}'",
                base.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(LinkKeepError::config("api.timeout_secs must be positive"));
        }
        if self.storage.credential_key.trim().is_empty() {
            return Err(LinkKeepError::config("storage.credential_key cannot be empty"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkKeepError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 远程 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Dedicated quick-link endpoint. When unset, quick links go to
    /// `POST /links` with `temporary: true`.
    #[serde(default)]
    pub quick_link_path: Option<String>,
}

/// 凭证存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_credential_dir")]
    pub credential_dir: PathBuf,
    #[serde(default = "default_credential_key")]
    pub credential_key: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_credential_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("linkkeep"))
        .unwrap_or_else(|| PathBuf::from(".linkkeep"))
}

fn default_credential_key() -> String {
    "token".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            quick_link_path: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credential_dir: default_credential_dir(),
            credential_key: default_credential_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
