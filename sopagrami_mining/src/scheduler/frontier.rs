use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::candidates::Candidate;

/// Unit of work for a worker.
#[derive(Debug, Clone)]
pub(crate) enum Job {
    /// A candidate whose support is still unknown: a seed or a fresh extension.
    Seed(Candidate),
    /// A frequent pattern whose extensions remain to be generated.
    Expand(Candidate),
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<Job>,
    /// Jobs handed out and not yet finished
    active: usize,
    aborted: bool,
}

/// Shared work queue. Seeds enter at the back, follow-up work at the front,
/// so the search runs depth-first while idle workers pick up pending seeds.
///
/// The run is over when the queue is empty and no job is active.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    state: Mutex<FrontierState>,
    ready: Condvar,
}

impl Frontier {
    pub(crate) fn new(seeds: impl IntoIterator<Item = Job>) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: seeds.into_iter().collect(),
                active: 0,
                aborted: false,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues jobs ahead of everything else, keeping their relative order.
    pub(crate) fn push_front(&self, jobs: Vec<Job>) {
        if jobs.is_empty() {
            return;
        }
        let mut state = self.lock();
        for job in jobs.into_iter().rev() {
            state.queue.push_front(job);
        }
        drop(state);
        self.ready.notify_all();
    }

    /// Blocks until a job is available. Returns `None` once the run is over
    /// or aborted. Every returned job must be closed with [`Frontier::finish`].
    pub(crate) fn pop(&self) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if state.aborted {
                return None;
            }
            if let Some(job) = state.queue.pop_front() {
                state.active += 1;
                return Some(job);
            }
            if state.active == 0 {
                drop(state);
                self.ready.notify_all();
                return None;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marks a job returned by [`Frontier::pop`] as done.
    #[contracts::debug_requires(self.lock().active > 0)]
    pub(crate) fn finish(&self) {
        let mut state = self.lock();
        state.active -= 1;
        let idle = state.active == 0 && state.queue.is_empty();
        drop(state);
        if idle {
            self.ready.notify_all();
        }
    }

    /// Stops handing out work and wakes every waiting worker.
    pub(crate) fn abort(&self) {
        let mut state = self.lock();
        state.aborted = true;
        state.queue.clear();
        drop(state);
        self.ready.notify_all();
    }

    #[cfg(test)]
    pub(crate) fn is_aborted(&self) -> bool {
        self.lock().aborted
    }
}

/// Closes the popped job on drop. If the worker is unwinding, the frontier is
/// aborted first so the remaining workers stop waiting.
pub(crate) struct ActiveJob<'f> {
    frontier: &'f Frontier,
}

impl<'f> ActiveJob<'f> {
    pub(crate) const fn new(frontier: &'f Frontier) -> Self {
        Self { frontier }
    }
}

impl Drop for ActiveJob<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.frontier.abort();
        }
        self.frontier.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::DfsCode;
    use sopagrami_graph::{EdgeDir, NO_LABEL};

    fn job(label: u32) -> Job {
        Job::Seed(Candidate::from_canonical(DfsCode::single(
            label,
            NO_LABEL,
            EdgeDir::Undirected,
            label,
        )))
    }

    fn label_of(job: &Job) -> u32 {
        match job {
            Job::Seed(c) | Job::Expand(c) => c.pattern.vlab[0],
        }
    }

    #[test]
    fn test_front_jobs_run_first() {
        let frontier = Frontier::new([job(0), job(1)]);
        let first = frontier.pop().unwrap();
        assert_eq!(label_of(&first), 0);
        frontier.push_front(vec![job(5), job(6)]);
        frontier.finish();

        let order: Vec<u32> = std::iter::from_fn(|| {
            let job = frontier.pop()?;
            frontier.finish();
            Some(label_of(&job))
        })
        .collect();
        assert_eq!(order, vec![5, 6, 1]);
    }

    #[test]
    fn test_finished_job_leaves_frontier_running() {
        let frontier = Frontier::new([job(0), job(1)]);
        {
            let _job = frontier.pop();
            let _active = ActiveJob::new(&frontier);
        }
        assert!(!frontier.is_aborted());
        assert_eq!(frontier.pop().map(|j| label_of(&j)), Some(1));
        frontier.finish();
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_panicking_job_releases_waiting_workers() {
        let frontier = Frontier::new([job(0), job(1)]);
        let first = frontier.pop();
        assert!(first.is_some());

        std::thread::scope(|scope| {
            let busy = scope.spawn(|| {
                let _active = ActiveJob::new(&frontier);
                // Let the second worker take the remaining job and block on
                // the one still active here.
                std::thread::sleep(std::time::Duration::from_millis(20));
                panic!("job 0 failed");
            });
            let waiting = scope.spawn(|| {
                let mut popped = 0;
                while let Some(_job) = frontier.pop() {
                    let _active = ActiveJob::new(&frontier);
                    popped += 1;
                }
                popped
            });
            assert!(busy.join().is_err());
            assert!(waiting.join().unwrap() <= 1);
        });
        assert!(frontier.is_aborted());
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_abort_drains_queue() {
        let frontier = Frontier::new([job(0), job(1)]);
        frontier.abort();
        assert!(frontier.is_aborted());
        assert!(frontier.pop().is_none());
    }
}
