//! 限流请求队列
//!
//! 所有发往目录 API 的请求都经过同一个队列：串行执行、固定间隔、
//! 429 时退避并重试一次，每个调用方通过独立的完成句柄拿到结果。
//!
//! # 模块结构
//! - `config` - 队列配置（间隔、退避、超时）
//! - `error` - 错误类型
//! - `queue` - 队列与排空循环
//! - `transport` - HTTP 传输抽象及 reqwest 实现

mod config;
mod error;
mod queue;
mod transport;

pub use config::FetchQueueConfig;
pub use error::FetchError;
pub use queue::{FetchHandle, QueueStats, RateLimitedFetchQueue};
pub use transport::{ReqwestTransport, Transport, TransportFailure, TransportResponse};
