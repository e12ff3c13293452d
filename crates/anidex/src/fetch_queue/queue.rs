//! 限流请求队列
//!
//! 单个排空任务按入队顺序逐条执行请求，每条之后固定等待一段间隔，
//! 因此任何时刻最多只有一个请求在途。

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::FetchQueueConfig;
use super::error::FetchError;
use super::transport::{Transport, TransportResponse};

type FetchResult = Result<Value, FetchError>;

/// 队列中的请求
struct QueueEntry {
    endpoint: String,
    completion: oneshot::Sender<FetchResult>,
}

/// 队列统计快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// 等待执行的请求数
    pub pending: usize,
    /// 排空循环是否在运行
    pub draining: bool,
    /// 成功完成的请求数
    pub completed: u64,
    /// 失败的请求数
    pub failed: u64,
    /// 因 429 触发的重试次数
    pub rate_limit_retries: u64,
}

#[derive(Default)]
struct QueueState {
    backlog: VecDeque<QueueEntry>,
    draining: bool,
    completed: u64,
    failed: u64,
    rate_limit_retries: u64,
}

struct QueueInner {
    config: FetchQueueConfig,
    transport: Arc<dyn Transport>,
    state: Mutex<QueueState>,
}

/// 限流请求队列
///
/// 克隆得到的句柄共享同一个积压队列和请求预算。
#[derive(Clone)]
pub struct RateLimitedFetchQueue {
    inner: Arc<QueueInner>,
}

impl std::fmt::Debug for RateLimitedFetchQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedFetchQueue")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl RateLimitedFetchQueue {
    /// 创建新的请求队列
    pub fn new(config: FetchQueueConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                config,
                transport,
                state: Mutex::new(QueueState::default()),
            }),
        }
    }

    /// 获取配置
    pub fn config(&self) -> &FetchQueueConfig {
        &self.inner.config
    }

    /// 将请求加入队列
    ///
    /// 没有排空任务时会在当前 tokio 运行时上启动一个；不在运行时内
    /// 调用时句柄立即返回 [`FetchError::QueueClosed`]。
    /// 端点必须是以 `/` 开头的相对路径，否则句柄立即返回
    /// [`FetchError::InvalidEndpoint`]，且不会发出请求。
    pub fn enqueue(&self, endpoint: impl Into<String>) -> FetchHandle {
        let endpoint = endpoint.into();
        let (tx, rx) = oneshot::channel();

        if !endpoint.starts_with('/') {
            let _ = tx.send(Err(FetchError::InvalidEndpoint(endpoint)));
            return FetchHandle { rx };
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!(endpoint = %endpoint, "不在 tokio 运行时内，请求被拒绝");
            let _ = tx.send(Err(FetchError::QueueClosed));
            return FetchHandle { rx };
        };

        let start_drain = {
            let mut state = self.inner.state.lock();
            state.backlog.push_back(QueueEntry {
                endpoint,
                completion: tx,
            });
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            debug!("启动请求队列排空循环");
            runtime.spawn(drain_loop(Arc::clone(&self.inner), Duration::ZERO));
        }

        FetchHandle { rx }
    }

    /// 入队并等待结果
    pub async fn fetch(&self, endpoint: impl Into<String>) -> FetchResult {
        self.enqueue(endpoint).await
    }

    /// 等待执行的请求数
    pub fn pending(&self) -> usize {
        self.inner.state.lock().backlog.len()
    }

    /// 排空循环是否在运行
    pub fn is_draining(&self) -> bool {
        self.inner.state.lock().draining
    }

    /// 获取统计快照
    pub fn stats(&self) -> QueueStats {
        let state = self.inner.state.lock();
        QueueStats {
            pending: state.backlog.len(),
            draining: state.draining,
            completed: state.completed,
            failed: state.failed,
            rate_limit_retries: state.rate_limit_retries,
        }
    }
}

/// 单个请求的完成句柄
///
/// 丢弃句柄不会取消请求，请求仍会按顺序执行。
#[derive(Debug)]
#[must_use = "a FetchHandle does nothing unless awaited"]
pub struct FetchHandle {
    rx: oneshot::Receiver<FetchResult>,
}

impl Future for FetchHandle {
    type Output = FetchResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(FetchError::QueueClosed)))
    }
}

/// 排空任务被中途丢弃（panic 或运行时关闭）时接管剩余积压
///
/// 积压为空则清除标志；否则在当前运行时上重启排空循环，
/// 没有可用运行时时以 [`FetchError::QueueClosed`] 结束所有剩余请求。
struct DrainGuard {
    inner: Arc<QueueInner>,
    finished: bool,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let orphaned = {
            let mut state = self.inner.state.lock();
            if state.backlog.is_empty() {
                state.draining = false;
                return;
            }
            match Handle::try_current() {
                // draining 保持为 true，由新循环继续处理
                Ok(runtime) => {
                    runtime.spawn(drain_loop(
                        Arc::clone(&self.inner),
                        self.inner.config.request_spacing(),
                    ));
                    None
                }
                Err(_) => {
                    state.draining = false;
                    Some(std::mem::take(&mut state.backlog))
                }
            }
        };

        match orphaned {
            None => warn!("排空任务异常中断，已重新启动排空循环"),
            Some(entries) => {
                warn!(pending = entries.len(), "排空任务异常中断，剩余请求以 QueueClosed 结束");
                for entry in entries {
                    let _ = entry.completion.send(Err(FetchError::QueueClosed));
                }
            }
        }
    }
}

/// `initial_delay` 非零时先等待，用于接替中断的循环时保持请求间隔
async fn drain_loop(inner: Arc<QueueInner>, initial_delay: Duration) {
    let mut guard = DrainGuard {
        inner: Arc::clone(&inner),
        finished: false,
    };

    if !initial_delay.is_zero() {
        sleep(initial_delay).await;
    }

    loop {
        // 判空与清除标志必须在同一把锁内，否则新入队的请求可能无人处理
        let entry = {
            let mut state = inner.state.lock();
            match state.backlog.pop_front() {
                Some(entry) => entry,
                None => {
                    state.draining = false;
                    guard.finished = true;
                    break;
                }
            }
        };

        let result = inner.execute(&entry.endpoint).await;

        {
            let mut state = inner.state.lock();
            match result {
                Ok(_) => state.completed += 1,
                Err(_) => state.failed += 1,
            }
        }

        if let Err(ref err) = result {
            warn!(endpoint = %entry.endpoint, error = %err, "目录 API 请求失败");
        }

        if entry.completion.send(result).is_err() {
            debug!(endpoint = %entry.endpoint, "调用方已丢弃句柄，结果被忽略");
        }

        // 无论成功失败都等待，保证整体请求速率有上限
        sleep(inner.config.request_spacing()).await;
    }

    debug!("请求队列已清空，排空循环退出");
}

impl QueueInner {
    /// 执行单个请求，429 时退避并重试一次
    async fn execute(&self, endpoint: &str) -> FetchResult {
        debug!(endpoint, "发送目录 API 请求");
        let response = self.send(endpoint).await?;

        if response.is_rate_limited() {
            // 重试同样是一次请求，间隔不得短于常规请求间隔
            let backoff = self
                .config
                .rate_limit_backoff()
                .max(self.config.request_spacing());
            warn!(endpoint, ?backoff, "被限流 (429)，退避后重试一次");
            self.state.lock().rate_limit_retries += 1;
            sleep(backoff).await;

            let retry = self.send(endpoint).await?;
            if !retry.is_success() {
                return Err(FetchError::RateLimitExceeded {
                    endpoint: endpoint.to_string(),
                    status: retry.status,
                });
            }
            return parse_body(endpoint, &retry);
        }

        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: response.status,
            });
        }

        parse_body(endpoint, &response)
    }

    /// 发送请求，受单次请求超时约束
    async fn send(&self, endpoint: &str) -> Result<TransportResponse, FetchError> {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, self.transport.get(endpoint)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(failure)) => Err(FetchError::Transport {
                endpoint: endpoint.to_string(),
                message: failure.message,
            }),
            Err(_) => Err(FetchError::Timeout {
                endpoint: endpoint.to_string(),
                timeout,
            }),
        }
    }
}

fn parse_body(endpoint: &str, response: &TransportResponse) -> FetchResult {
    serde_json::from_slice(&response.body).map_err(|e| FetchError::MalformedResponse {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
