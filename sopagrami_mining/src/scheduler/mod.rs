//! Parallel pattern-growth scheduler.
//!
//! A fixed pool of workers shares one [`Frontier`]. Each seed is tested; a
//! frequent pattern is recorded and scheduled for expansion; its canonical
//! extensions are deduplicated against the run-wide [`SeenKeys`] and queued
//! for testing in turn. Infrequent patterns are never extended, which is
//! sound because MNI support is anti-monotonic.

mod abort;
mod frontier;
mod seen;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

pub use abort::AbortHandle;
use frontier::{ActiveJob, Frontier, Job};
use seen::SeenKeys;
use sopagrami_common::Params;
use sopagrami_graph::MiningView;

use crate::candidates::{self, Candidate, Seed};
use crate::error::MiningError;
use crate::results::{FrequentPattern, ResultCollector};
use crate::stats::MiningStats;
use crate::support::{self, Support, SupportOracle};

/// Shared state of one run.
struct Context<'a, 'g> {
    view: &'a MiningView<'g>,
    params: &'a Params,
    oracle: SupportOracle<'a, 'g>,
    frontier: Frontier,
    seen: SeenKeys,
    results: ResultCollector,
    stats: &'a MiningStats,
    abort: &'a AbortHandle,
}

impl Context<'_, '_> {
    fn worker(&self, id: usize) -> Result<(), MiningError> {
        tracing::debug!("worker {} started", id);
        let processed = guarded(|| drain(&self.frontier, self.abort, |job| self.process(job)))?;
        tracing::debug!("worker {} finished after {} jobs", id, processed);
        Ok(())
    }

    fn process(&self, job: Job) {
        match job {
            Job::Seed(candidate) => self.test(candidate),
            Job::Expand(candidate) => self.expand(&candidate),
        }
    }

    fn test(&self, candidate: Candidate) {
        let outcome = self.oracle.evaluate(&candidate.pattern);
        let Support::Frequent { support, .. } = outcome else {
            tracing::trace!("infrequent: {}", candidate.key);
            return;
        };
        tracing::debug!("frequent (support {}): {}", support, candidate.key);

        let expandable = self.params.allows_extension(candidate.num_edges());
        if let Some(record) = support::record(candidate.pattern.clone(), candidate.key.clone(), outcome) {
            self.results.push(record);
        }
        if expandable {
            self.frontier.push_front(vec![Job::Expand(candidate)]);
        }
    }

    fn expand(&self, parent: &Candidate) {
        let children = candidates::extensions(self.view, self.params, &parent.code);
        let total = children.len();
        let fresh: Vec<Job> = children
            .into_iter()
            .filter(|child| self.seen.insert(&child.key, &child.pattern))
            .map(Job::Seed)
            .collect();
        self.stats.inc_duplicates((total - fresh.len()) as u64);
        tracing::trace!(
            "{}: {} extensions, {} new",
            parent.key,
            total,
            fresh.len()
        );
        self.frontier.push_front(fresh);
    }
}

/// Processes jobs until the frontier runs dry. Returns the number of jobs
/// processed.
fn drain(
    frontier: &Frontier,
    abort: &AbortHandle,
    mut process: impl FnMut(Job),
) -> Result<usize, MiningError> {
    let mut processed = 0usize;
    while let Some(job) = frontier.pop() {
        let _active = ActiveJob::new(frontier);
        if abort.is_aborted() {
            frontier.abort();
            return Err(MiningError::Aborted);
        }
        process(job);
        processed += 1;
    }
    Ok(processed)
}

/// Runs one worker body, turning a panic into [`MiningError::WorkerFailed`].
/// The unwinding [`ActiveJob`] has already aborted the frontier by then.
fn guarded<T>(body: impl FnOnce() -> Result<T, MiningError>) -> Result<T, MiningError> {
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!("worker panicked: {}", message);
        Err(MiningError::WorkerFailed(message))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Runs the pattern growth from `seeds` on a dedicated pool of
/// `params.num_threads` workers.
///
/// # Errors
///
/// Returns [`MiningError::ThreadPool`] if the pool cannot be built,
/// [`MiningError::Aborted`] if `abort` fires before the run completes and
/// [`MiningError::WorkerFailed`] if a worker panics.
pub fn run(
    view: &MiningView<'_>,
    params: &Params,
    seeds: Vec<Seed>,
    stats: &MiningStats,
    abort: &AbortHandle,
) -> Result<Vec<FrequentPattern>, MiningError> {
    let seen = SeenKeys::new();
    let jobs: Vec<Job> = seeds
        .into_iter()
        .map(|seed| seed.candidate)
        .filter(|candidate| seen.insert(&candidate.key, &candidate.pattern))
        .map(Job::Seed)
        .collect();
    stats.add_seeds(jobs.len() as u64);

    let ctx = Context {
        view,
        params,
        oracle: SupportOracle::new(view, params, stats),
        frontier: Frontier::new(jobs),
        seen,
        results: ResultCollector::new(),
        stats,
        abort,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.num_threads)
        .thread_name(|i| format!("sopagrami-worker-{i}"))
        .build()
        .map_err(|e| MiningError::thread_pool(e.to_string()))?;
    tracing::debug!("worker pool ready with {} threads", params.num_threads);

    let first_error: Mutex<Option<MiningError>> = Mutex::new(None);
    pool.scope(|scope| {
        for id in 0..params.num_threads {
            let ctx = &ctx;
            let first_error = &first_error;
            scope.spawn(move |_| {
                if let Err(err) = ctx.worker(id) {
                    ctx.frontier.abort();
                    let mut slot = first_error
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    slot.get_or_insert(err);
                }
            });
        }
    });

    if let Some(err) = first_error
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
    {
        return Err(err);
    }

    tracing::debug!("{} distinct keys scheduled", ctx.seen.len());
    Ok(ctx.results.finish())
}
