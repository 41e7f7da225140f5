/*!
 * Directory batch scheduler.
 *
 * Files are queued up front and released in small batches on a fixed tick.
 * When a file fails because the provider quota is exhausted, the scheduler
 * pauses: no batch is released until a cooldown has elapsed, after which the
 * files that hit the limit are resubmitted. A later rate-limit failure during
 * the cooldown restarts it.
 *
 * State machine:
 *
 * ```text
 * Idle --first tick--> Running --rate limit--> Paused --cooldown--> Running
 *                         |                                            |
 *                         +----- queue empty, nothing in flight -------+--> Done
 * ```
 */

use async_trait::async_trait;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::app_config::SchedulerConfig;
use crate::errors::AppError;

/// Work performed for every dispatched file
#[async_trait]
pub trait FileProcessor: Send + Sync {
    /// Process one file end to end
    async fn process_file(&self, path: &Path) -> Result<(), AppError>;
}

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, first tick not yet fired
    Idle,
    /// Releasing batches
    Running,
    /// Waiting for the rate-limit cooldown
    Paused,
    /// Queue drained and nothing left in flight
    Done,
}

#[derive(Debug)]
struct SchedulerShared {
    queue: VecDeque<PathBuf>,
    state: SchedulerState,
    paused: bool,
    // @field: Pending resume, at most one
    resume_timer: Option<JoinHandle<()>>,
    // @field: Bumped whenever the resume timer is replaced
    timer_generation: u64,
    // @field: Files waiting for the cooldown to end
    retry_files: Vec<PathBuf>,
    in_flight: usize,
}

struct SchedulerInner {
    processor: Arc<dyn FileProcessor>,
    config: SchedulerConfig,
    shared: Mutex<SchedulerShared>,
    idle: Notify,
}

/// Throttled, pausable dispatcher of file work
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

// @struct: Decrements the in-flight count when a processing task ends, even on panic
struct InFlightGuard {
    scheduler: Scheduler,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.scheduler.inner.shared.lock().in_flight -= 1;
        self.scheduler.inner.idle.notify_waiters();
    }
}

impl Scheduler {
    /// Create a scheduler around a file processor
    pub fn new(processor: Arc<dyn FileProcessor>, config: SchedulerConfig) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                processor,
                config,
                shared: Mutex::new(SchedulerShared {
                    queue: VecDeque::new(),
                    state: SchedulerState::Idle,
                    paused: false,
                    resume_timer: None,
                    timer_generation: 0,
                    retry_files: Vec::new(),
                    in_flight: 0,
                }),
                idle: Notify::new(),
            }),
        }
    }

    /// Queue a file for processing
    pub fn submit(&self, path: PathBuf) {
        debug!("Queued: {}", path.display());
        self.inner.shared.lock().queue.push_back(path);
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        self.inner.shared.lock().state
    }

    /// Files still waiting in the queue
    pub fn queued(&self) -> usize {
        self.inner.shared.lock().queue.len()
    }

    /// Pause after a rate-limit failure and retry the file once the cooldown ends
    ///
    /// Any pending resume is cancelled and replaced, so the cooldown always
    /// counts from the most recent failure. Files from earlier failures stay in
    /// the retry list and are resubmitted together.
    pub fn on_rate_limited(&self, path: PathBuf) {
        let cooldown = self.inner.config.cooldown();
        let mut shared = self.inner.shared.lock();

        shared.paused = true;
        shared.state = SchedulerState::Paused;
        if let Some(timer) = shared.resume_timer.take() {
            timer.abort();
        }

        warn!("Rate limited on {}; pausing for {}s", path.display(), cooldown.as_secs());
        shared.retry_files.push(path);
        shared.timer_generation += 1;

        let generation = shared.timer_generation;
        let scheduler = self.clone();
        shared.resume_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            scheduler.resume(generation);
        }));
    }

    // @transition: Paused -> Running, resubmits every file waiting for the cooldown
    fn resume(&self, generation: u64) {
        let retry_files = {
            let mut shared = self.inner.shared.lock();
            // A newer failure replaced this timer after it fired
            if shared.timer_generation != generation {
                return;
            }

            shared.resume_timer = None;
            shared.paused = false;
            if shared.state == SchedulerState::Paused {
                shared.state = SchedulerState::Running;
            }

            let retry_files = std::mem::take(&mut shared.retry_files);
            shared.in_flight += retry_files.len();
            retry_files
        };

        info!("Cooldown elapsed, retrying {} file(s)", retry_files.len());
        for path in retry_files {
            self.spawn_processing(path);
        }
        self.inner.idle.notify_waiters();
    }

    /// Release at most one batch; returns false once the tick loop should stop
    fn tick(&self) -> bool {
        let batch: Vec<PathBuf> = {
            let mut shared = self.inner.shared.lock();
            if shared.state == SchedulerState::Idle {
                shared.state = SchedulerState::Running;
            }

            if shared.paused {
                debug!("Paused, skipping tick");
                return true;
            }

            if shared.queue.is_empty() {
                return false;
            }

            let count = self.inner.config.batch_size.min(shared.queue.len());
            shared.in_flight += count;
            shared.queue.drain(..count).collect()
        };

        info!("Dispatching {} file(s), {} remaining in queue", batch.len(), self.queued());
        for path in batch {
            self.spawn_processing(path);
        }
        true
    }

    // @requires: in_flight already counts this file
    fn spawn_processing(&self, path: PathBuf) {
        let guard = InFlightGuard { scheduler: self.clone() };

        tokio::spawn(async move {
            let scheduler = guard.scheduler.clone();
            match scheduler.inner.processor.process_file(&path).await {
                Ok(()) => {}
                Err(e) if e.is_rate_limited() => scheduler.on_rate_limited(path),
                Err(e) => error!("Failed to process {}: {}", path.display(), e),
            }
            drop(guard);
        });
    }

    // @waits: No file in flight and no resume pending
    async fn wait_until_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let shared = self.inner.shared.lock();
                if shared.in_flight == 0 && shared.resume_timer.is_none() {
                    return;
                }
            }

            notified.await;
        }
    }

    /// Drive the scheduler until every queued file has been processed
    ///
    /// The first tick fires one interval after the call. The tick loop stops
    /// when the queue is empty and the scheduler is not paused; the call then
    /// waits for in-flight files and pending retries before reporting `Done`.
    pub async fn run(&self) {
        let period = self.inner.config.tick_interval();
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if !self.tick() {
                break;
            }
        }

        self.wait_until_idle().await;
        self.inner.shared.lock().state = SchedulerState::Done;
        info!("All files processed");
    }
}
