//! 队列配置
//!
//! 所有时间均以毫秒保存，便于在 TOML 和环境变量中书写

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 请求队列配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQueueConfig {
    /// 相邻两次请求之间的最小间隔（毫秒）
    #[serde(default = "default_request_spacing")]
    pub request_spacing_ms: u64,
    /// 收到 429 后重试前的等待时间（毫秒）
    #[serde(default = "default_rate_limit_backoff")]
    pub rate_limit_backoff_ms: u64,
    /// 单次请求超时（毫秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// 建立连接超时（毫秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

fn default_request_spacing() -> u64 {
    400
}
fn default_rate_limit_backoff() -> u64 {
    1500
}
fn default_request_timeout() -> u64 {
    30_000
}
fn default_connect_timeout() -> u64 {
    10_000
}

impl Default for FetchQueueConfig {
    fn default() -> Self {
        DEFAULT_FETCH_QUEUE_CONFIG
    }
}

/// 默认队列配置（目录 API 大约允许每秒 3-4 个请求）
pub const DEFAULT_FETCH_QUEUE_CONFIG: FetchQueueConfig = FetchQueueConfig {
    request_spacing_ms: 400,
    rate_limit_backoff_ms: 1500,
    request_timeout_ms: 30_000,
    connect_timeout_ms: 10_000,
};

impl FetchQueueConfig {
    /// 设置请求间隔
    pub fn with_request_spacing(mut self, spacing: Duration) -> Self {
        self.request_spacing_ms = duration_to_ms(spacing);
        self
    }

    /// 设置 429 退避时间
    pub fn with_rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff_ms = duration_to_ms(backoff);
        self
    }

    /// 设置单次请求超时
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = duration_to_ms(timeout);
        self
    }

    pub fn request_spacing(&self) -> Duration {
        Duration::from_millis(self.request_spacing_ms)
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchQueueConfig::default();
        assert_eq!(config.request_spacing(), Duration::from_millis(400));
        assert_eq!(config.rate_limit_backoff(), Duration::from_millis(1500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_builder_methods() {
        let config = FetchQueueConfig::default()
            .with_request_spacing(Duration::from_millis(50))
            .with_rate_limit_backoff(Duration::from_millis(200))
            .with_request_timeout(Duration::from_secs(2));

        assert_eq!(config.request_spacing_ms, 50);
        assert_eq!(config.rate_limit_backoff_ms, 200);
        assert_eq!(config.request_timeout_ms, 2000);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: FetchQueueConfig =
            serde_json::from_str(r#"{"request_spacing_ms": 1000}"#).unwrap();
        assert_eq!(config.request_spacing_ms, 1000);
        assert_eq!(config.rate_limit_backoff_ms, 1500);
        assert_eq!(config.request_timeout_ms, 30_000);
    }
}
