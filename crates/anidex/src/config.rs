//! 配置加载
//!
//! 合并顺序：内置默认值 ← TOML 配置文件（可选）← `ANIDEX__` 前缀的环境变量。
//! 环境变量用双下划线分隔层级，例如 `ANIDEX__QUEUE__REQUEST_SPACING_MS=500`。

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::fetch_queue::FetchQueueConfig;

/// 目录 API 默认地址
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "ANIDEX";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// 目录 API 连接设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// API 根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求使用的 User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("anidex/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnidexConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub queue: FetchQueueConfig,
}

impl AnidexConfig {
    /// 从可选的配置文件和环境变量加载
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: AnidexConfig = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.catalog.base_url)
            .map_err(|e| ConfigError::invalid("catalog.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "catalog.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.catalog.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("catalog.user_agent", "must not be empty"));
        }
        if self.queue.request_timeout_ms == 0 {
            return Err(ConfigError::invalid("queue.request_timeout_ms", "must be > 0"));
        }
        if self.queue.connect_timeout_ms == 0 {
            return Err(ConfigError::invalid("queue.connect_timeout_ms", "must be > 0"));
        }

        Ok(())
    }
}
