//! Spider coordinator - main crawl orchestration logic
//!
//! This module owns the worker pool that drives a crawl:
//! - Seeding the scheduler with the start target at depth 1
//! - Spawning workers that fetch, parse, persist and enqueue children
//! - Waiting for termination (queue empty with nothing active)
//! - Stopping and joining every worker before returning a report
//!
//! Failures never escape a worker. A failed fetch retires its task with no
//! children; a failed storage write is logged and the page's links are still
//! followed.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::crawler::scheduler::{CrawlTask, Scheduler};
use crate::index::WordFrequencyTable;
use crate::state::{CrawlPhase, TaskState};
use crate::storage::{SharedStorage, StorageError};
use crate::url::RequestTarget;
use crate::SpiderError;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::future::Future;
use std::time::Instant;
use tokio::task::JoinSet;

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Tasks whose page was fetched
    pub processed: u64,

    /// Tasks whose fetch failed
    pub failed: u64,

    /// Postings newly written to storage
    pub stored_words: u64,

    /// Deepest level that was processed
    pub deepest: u32,
}

#[derive(Default)]
struct CrawlStats {
    processed: AtomicU64,
    failed: AtomicU64,
    stored_words: AtomicU64,
    deepest: AtomicU32,
}

impl CrawlStats {
    fn record(&self, state: TaskState, depth: u32) {
        if !state.is_terminal() {
            return;
        }
        if state.is_success() {
            self.processed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        self.deepest.fetch_max(depth, Ordering::Relaxed);
    }

    fn report(&self) -> CrawlReport {
        CrawlReport {
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            stored_words: self.stored_words.load(Ordering::Relaxed),
            deepest: self.deepest.load(Ordering::Relaxed),
        }
    }
}

/// Depth-bounded breadth-first crawler backed by a worker pool
pub struct Spider {
    fetcher: Arc<PageFetcher>,
    storage: SharedStorage,
    workers: usize,
    dedupe: bool,
    phase: Mutex<CrawlPhase>,
}

impl Spider {
    /// Creates a spider with one worker per available CPU
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The page fetcher shared by all workers
    /// * `storage` - The index every page is written to
    pub fn new(fetcher: PageFetcher, storage: SharedStorage) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            fetcher: Arc::new(fetcher),
            storage,
            workers,
            dedupe: false,
            phase: Mutex::new(CrawlPhase::Idle),
        }
    }

    /// Builds a spider from configuration
    pub fn from_config(config: &Config, storage: SharedStorage) -> Result<Self, SpiderError> {
        let fetcher = PageFetcher::new(&config.fetcher)?;
        Ok(Self::new(fetcher, storage)
            .with_workers(config.spider.worker_count())
            .with_dedupe(config.spider.dedupe_targets))
    }

    /// Sets the worker pool size; zero is treated as one
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Enables the per-crawl visited set
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, next: CrawlPhase) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if !phase.can_transition_to(next) {
            tracing::warn!("Unexpected crawl phase change {} -> {}", *phase, next);
        }
        tracing::debug!("Crawl phase {} -> {}", *phase, next);
        *phase = next;
    }

    /// Crawls from `seed` and returns once every reachable task is done
    ///
    /// The seed is depth 1. Links found on a page at depth `d` are queued at
    /// depth `d + 1` only while `d < max_depth`, so no task deeper than
    /// `max_depth` is ever processed. A `max_depth` of zero crawls nothing.
    ///
    /// # Arguments
    ///
    /// * `seed` - The start target
    /// * `max_depth` - Deepest level to fetch
    pub async fn start(&self, seed: RequestTarget, max_depth: u32) -> CrawlReport {
        if max_depth == 0 {
            tracing::warn!("max-depth is 0, nothing to crawl");
            return CrawlReport::default();
        }

        let started = Instant::now();
        let scheduler = Arc::new(Scheduler::new(self.dedupe));
        let stats = Arc::new(CrawlStats::default());

        tracing::info!(
            "Starting crawl of {} with {} workers, max depth {}",
            seed,
            self.workers,
            max_depth
        );

        self.set_phase(CrawlPhase::Running);
        scheduler.push(CrawlTask::seed(seed));

        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            let worker = Worker {
                id,
                fetcher: Arc::clone(&self.fetcher),
                storage: Arc::clone(&self.storage),
                scheduler: Arc::clone(&scheduler),
                stats: Arc::clone(&stats),
                max_depth,
            };
            workers.spawn(worker.run());
        }

        scheduler.wait_idle().await;

        self.set_phase(CrawlPhase::Draining);
        scheduler.stop();

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl worker terminated abnormally: {}", e);
            }
        }

        self.set_phase(CrawlPhase::Stopped);

        let report = stats.report();
        tracing::info!(
            "Crawl finished in {:.2}s: {} pages, {} failed, {} postings stored",
            started.elapsed().as_secs_f64(),
            report.processed,
            report.failed,
            report.stored_words
        );
        report
    }
}

#[derive(Clone)]
struct Worker {
    id: usize,
    fetcher: Arc<PageFetcher>,
    storage: SharedStorage,
    scheduler: Arc<Scheduler>,
    stats: Arc<CrawlStats>,
    max_depth: u32,
}

impl Worker {
    async fn run(self) {
        tracing::trace!("Worker {} started", self.id);

        while let Some(task) = self.scheduler.next().await {
            let mut state = TaskState::Queued;
            advance(&mut state, TaskState::Active, &task.target);

            let target = task.target.clone();
            let depth = task.depth;
            let worker = self.clone();
            let (outcome, children) =
                isolate(&target, async move { worker.process(&task).await }).await;

            advance(&mut state, outcome, &target);
            self.stats.record(state, depth);
            self.scheduler.complete(children);
        }

        tracing::trace!("Worker {} stopped", self.id);
    }

    /// Fetches, parses and persists one task
    ///
    /// # Returns
    ///
    /// The terminal state of the task and the children to enqueue
    async fn process(&self, task: &CrawlTask) -> (TaskState, Vec<CrawlTask>) {
        tracing::debug!("Worker {} fetching {} (depth {})", self.id, task.target, task.depth);

        let body = match self.fetcher.fetch(&task.target).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", task.target, e);
                return (TaskState::Failed, Vec::new());
            }
        };

        let ParsedPage { words, links } = parse_page(&body, &task.target);

        match self.persist(&task.target, words).await {
            Ok(stored) => {
                self.stats
                    .stored_words
                    .fetch_add(stored as u64, Ordering::Relaxed);
            }
            Err(e) => tracing::warn!("Failed to store words for {}: {}", task.target, e),
        }

        let children = if task.depth < self.max_depth {
            links
                .into_iter()
                .filter(|link| !link.host.is_empty())
                .map(|link| task.child(link))
                .collect()
        } else {
            Vec::new()
        };

        (TaskState::Completed, children)
    }

    async fn persist(
        &self,
        target: &RequestTarget,
        words: WordFrequencyTable,
    ) -> Result<usize, StorageError> {
        let storage = Arc::clone(&self.storage);
        let target = target.clone();

        tokio::task::spawn_blocking(move || {
            let mut storage = storage.lock().map_err(|_| StorageError::LockPoisoned)?;
            storage.write_document(&target, &words)
        })
        .await
        .map_err(|e| StorageError::Background(e.to_string()))?
    }
}

/// Moves a task to `next`, warning on an illegal transition
fn advance(state: &mut TaskState, next: TaskState, target: &RequestTarget) {
    if !state.can_transition_to(next) {
        tracing::warn!("Unexpected task state change {} -> {} for {}", *state, next, target);
    }
    tracing::trace!("Task {} {} -> {}", target, *state, next);
    *state = next;
}

/// Runs one task's processing on its own tokio task
///
/// A panic while processing retires the task as failed with no children, so
/// the scheduler's active count still drops and the worker keeps running.
async fn isolate<F>(target: &RequestTarget, work: F) -> (TaskState, Vec<CrawlTask>)
where
    F: Future<Output = (TaskState, Vec<CrawlTask>)> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Processing {} aborted: {}", target, e);
            (TaskState::Failed, Vec::new())
        }
    }
}

/// Runs a complete crawl from configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the page fetcher
/// 2. Start the worker pool on the configured seed
/// 3. Return the crawl report
///
/// Storage setup (schema, clearing) is the caller's responsibility.
///
/// # Arguments
///
/// * `config` - The spider configuration
/// * `storage` - The index pages are written to
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(SpiderError)` - The HTTP client could not be built
pub async fn run_crawl(config: &Config, storage: SharedStorage) -> Result<CrawlReport, SpiderError> {
    let spider = Spider::from_config(config, storage)?;
    Ok(spider
        .start(config.spider.seed(), config.spider.max_depth)
        .await)
}
