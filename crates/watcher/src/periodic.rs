//! Periodic task over locked shared state
//!
//! [`Periodic`] owns a value behind a mutex and runs a task against it from
//! a single background thread on a fixed interval. A tick that fires while
//! the task is still running is dropped rather than queued, so runs never
//! overlap or pile up.

use crossbeam_channel::{select, tick, unbounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;
use tracing::debug;

pub struct Periodic<T> {
    state: Arc<Mutex<T>>,
    /// Dropping the sender stops the worker
    stop_tx: Mutex<Option<Sender<()>>>,
    /// Held across the join so concurrent closers all wait for the worker
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl<T: Send + 'static> Periodic<T> {
    /// Start running `task` against `value` every `interval`
    ///
    /// The first run happens one interval after spawning.
    pub fn spawn<F>(name: &str, value: T, interval: Duration, mut task: F) -> io::Result<Self>
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        let state = Arc::new(Mutex::new(value));
        let (stop_tx, stop_rx) = unbounded::<()>();
        let ticker = tick(interval);

        let worker_state = Arc::clone(&state);
        let worker = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run(&worker_state, &ticker, &stop_rx, &mut task))?;

        Ok(Self {
            state,
            stop_tx: Mutex::new(Some(stop_tx)),
            worker_id: worker.thread().id(),
            worker: Mutex::new(Some(worker)),
        })
    }
}

fn run<T, F>(state: &Mutex<T>, ticker: &Receiver<std::time::Instant>, stop_rx: &Receiver<()>, task: &mut F)
where
    F: FnMut(&mut T),
{
    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                // Both may be ready at once; stopping wins
                if let Err(TryRecvError::Disconnected) = stop_rx.try_recv() {
                    break;
                }
                let mut guard = state.lock();
                task(&mut guard);
            }
        }
    }
    debug!("Periodic worker {:?} stopped", thread::current().name());
}

impl<T> Periodic<T> {
    /// Run `f` with exclusive access to the shared value
    ///
    /// Blocks while the background task is running.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.state.lock();
        f(&mut guard)
    }

    /// Whether the background worker is still scheduled
    pub fn is_running(&self) -> bool {
        self.stop_tx.lock().is_some()
    }

    /// Stop the timer and wait for an in-flight run to finish
    ///
    /// Idempotent, and safe to call from several threads at once: every
    /// caller returns only after the worker has exited. When called from
    /// inside the task itself the worker is told to stop but not joined,
    /// since it cannot wait for itself.
    pub fn close(&self) {
        drop(self.stop_tx.lock().take());

        if thread::current().id() == self.worker_id {
            return;
        }

        let mut worker = self.worker.lock();
        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                tracing::error!("Periodic worker panicked");
            }
        }
    }
}

impl<T> Drop for Periodic<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[test]
    fn test_task_runs_on_interval() {
        let periodic = Periodic::spawn("test-tick", 0usize, Duration::from_millis(10), |count| {
            *count += 1;
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while periodic.with(|count| *count) < 3 {
            assert!(Instant::now() < deadline, "task never ran three times");
            thread::sleep(Duration::from_millis(5));
        }
        periodic.close();
    }

    #[test]
    fn test_close_stops_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        let task_runs = Arc::clone(&runs);
        let periodic = Periodic::spawn("test-close", (), Duration::from_millis(5), move |_| {
            task_runs.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(30));
        periodic.close();
        assert!(!periodic.is_running());

        let after_close = runs.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(runs.load(Ordering::SeqCst), after_close);

        // Second close is a no-op
        periodic.close();
    }

    #[test]
    fn test_concurrent_close_waits_for_worker() {
        let runs = Arc::new(AtomicUsize::new(0));
        let task_runs = Arc::clone(&runs);
        let periodic = Arc::new(
            Periodic::spawn("test-concurrent-close", (), Duration::from_millis(1), move |_| {
                thread::sleep(Duration::from_millis(20));
                task_runs.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap(),
        );

        // Let a run get underway
        thread::sleep(Duration::from_millis(10));

        let closers: Vec<_> = (0..2)
            .map(|_| {
                let periodic = Arc::clone(&periodic);
                let runs = Arc::clone(&runs);
                thread::spawn(move || {
                    periodic.close();
                    let at_return = runs.load(Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(50));
                    assert_eq!(runs.load(Ordering::SeqCst), at_return);
                })
            })
            .collect();
        for closer in closers {
            closer.join().unwrap();
        }
    }

    #[test]
    fn test_with_works_after_close() {
        let periodic = Periodic::spawn("test-with", vec![1], Duration::from_secs(3600), |_| {}).unwrap();
        periodic.close();
        periodic.with(|v| v.push(2));
        assert_eq!(periodic.with(|v| v.clone()), vec![1, 2]);
    }

    #[test]
    fn test_close_from_inside_task_does_not_hang() {
        let slot: Arc<Mutex<Option<Arc<Periodic<()>>>>> = Arc::new(Mutex::new(None));
        let task_slot = Arc::clone(&slot);
        let periodic = Arc::new(
            Periodic::spawn("test-self-close", (), Duration::from_millis(5), move |_| {
                if let Some(p) = task_slot.lock().as_ref() {
                    p.close();
                }
            })
            .unwrap(),
        );
        *slot.lock() = Some(Arc::clone(&periodic));

        let deadline = Instant::now() + Duration::from_secs(5);
        while periodic.is_running() {
            assert!(Instant::now() < deadline, "worker never closed itself");
            thread::sleep(Duration::from_millis(5));
        }
        slot.lock().take();
    }
}
