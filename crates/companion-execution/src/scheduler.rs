//! Cancellable delayed replies.
//!
//! Bot replies arrive after a short "thinking" delay. Each reply is a task
//! owned by a [`ReplyScheduler`]; shutting the scheduler down (or dropping
//! it) cancels every reply that has not fired yet, so a late reply never
//! reaches state that has been torn down.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

pub struct ReplyScheduler {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl Default for ReplyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyScheduler {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Runs `job` after `delay` unless the scheduler is shut down first.
    ///
    /// Returns false when the job was not scheduled (already shut down, or
    /// no async runtime is available).
    pub fn schedule<F>(&self, label: &'static str, delay: Duration, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.token.is_cancelled() {
            tracing::warn!("[ReplyScheduler] Shut down; dropping {} reply", label);
            return false;
        }

        let token = self.token.clone();
        let task = self.tracker.track_future(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("[ReplyScheduler] Cancelled pending {} reply", label);
                }
                _ = sleep(delay) => {
                    job();
                }
            }
        });

        spawn(label, task)
    }

    /// Number of replies that have not fired or been cancelled yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels all pending replies and refuses new ones.
    pub fn shutdown(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(
                "[ReplyScheduler] Shutting down with {} pending",
                self.tracker.len()
            );
        }
        self.token.cancel();
        self.tracker.close();
    }

    /// Shuts down and waits until every task has finished unwinding.
    pub async fn shutdown_and_wait(&self) {
        self.shutdown();
        self.tracker.wait().await;
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn<T>(label: &'static str, task: T) -> bool
where
    T: std::future::Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
            true
        }
        Err(_) => {
            tracing::error!("[ReplyScheduler] No async runtime; dropping {} reply", label);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(target_arch = "wasm32")]
fn spawn<T>(_label: &'static str, task: T) -> bool
where
    T: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task);
    true
}
