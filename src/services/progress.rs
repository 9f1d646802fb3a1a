use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
const MAX_DOTS: usize = 6;

/// Destination for progress text.
pub trait ProgressSink: Send + Sync {
    fn write(&self, text: &str);

    /// Removes whatever progress text is on the current line.
    fn clear(&self) {
        self.write("\r");
    }
}

/// Prints `label` followed by a slowly growing run of dots while a
/// download is in flight.
pub struct ProgressReporter {
    sink: Arc<dyn ProgressSink>,
    tick: Duration,
}

impl ProgressReporter {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            sink,
            tick: TICK_INTERVAL,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn sink(&self) -> &Arc<dyn ProgressSink> {
        &self.sink
    }

    /// Spawns the ticker on the current tokio runtime.
    pub fn start(&self, label: impl Into<String>) -> ProgressHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(tick_loop(
            self.sink.clone(),
            label.into(),
            self.tick,
            token.clone(),
        ));
        ProgressHandle {
            token,
            task: Some(task),
        }
    }
}

async fn tick_loop(
    sink: Arc<dyn ProgressSink>,
    label: String,
    tick: Duration,
    token: CancellationToken,
) {
    loop {
        if token.is_cancelled() {
            return;
        }
        sink.write(&format!("\r{label}"));
        if !pause(tick, &token).await {
            return;
        }

        for _ in 0..MAX_DOTS {
            if token.is_cancelled() {
                return;
            }
            sink.write(".");
            if !pause(tick, &token).await {
                return;
            }
        }
    }
}

/// Sleeps one tick. Returns false as soon as the token is cancelled.
async fn pause(tick: Duration, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(tick) => true,
    }
}

/// Owner side of a running ticker.
///
/// Cancelling is idempotent. Dropping the handle cancels the ticker without
/// waiting for it.
pub struct ProgressHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels the ticker and waits for it to exit. Nothing is written to
    /// the sink once this returns.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!(error = %e, "Progress task ended abnormally");
            }
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
