//! Cancellable frame-clocked callback.
//!
//! The per-frame animator must stop the moment the widget is torn down: a
//! callback firing into a destroyed view is a correctness bug, not a
//! performance one. The loop is therefore an owned handle: `stop()` (or
//! dropping the handle) flips the cancel flag and joins the worker, so no
//! callback can run after either returns.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to a repeating frame task.
pub struct FrameLoop {
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Spawn the loop. `on_frame` receives seconds elapsed since start and
    /// runs once per `period` until the handle is stopped or dropped.
    ///
    /// Spawn failure is reported, not fatal: a widget without its animator
    /// stays inert but queryable.
    pub fn start<F>(period: Duration, mut on_frame: F) -> io::Result<Self>
    where
        F: FnMut(f32) + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let worker = thread::Builder::new()
            .name("lapidary-frame".into())
            .spawn(move || {
                let start = Instant::now();
                while !flag.load(Ordering::Relaxed) {
                    on_frame(start.elapsed().as_secs_f32());
                    thread::sleep(period);
                }
            })?;

        Ok(Self {
            cancelled,
            worker: Some(worker),
        })
    }

    /// Whether the loop is still scheduled.
    pub fn is_running(&self) -> bool {
        self.worker.is_some() && !self.cancelled.load(Ordering::Relaxed)
    }

    /// Cancel and join. After this returns no callback will run again.
    pub fn stop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn callback_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut frame_loop = FrameLoop::start(Duration::from_millis(1), move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        while ticks.load(Ordering::Relaxed) < 3 {
            thread::yield_now();
        }
        frame_loop.stop();
        assert!(ticks.load(Ordering::Relaxed) >= 3);
    }

    #[test]
    fn stop_prevents_further_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut frame_loop = FrameLoop::start(Duration::from_millis(1), move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        while ticks.load(Ordering::Relaxed) == 0 {
            thread::yield_now();
        }
        frame_loop.stop();
        assert!(!frame_loop.is_running());

        // stop() joined the worker; the count is final
        let frozen = ticks.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::Relaxed), frozen);
    }

    #[test]
    fn drop_cancels() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        {
            let _frame_loop = FrameLoop::start(Duration::from_millis(1), move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
            while ticks.load(Ordering::Relaxed) == 0 {
                thread::yield_now();
            }
        }

        // Drop joined the worker; the count is final
        let frozen = ticks.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::Relaxed), frozen);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut frame_loop = FrameLoop::start(Duration::from_millis(1), |_| {}).unwrap();
        frame_loop.stop();
        frame_loop.stop();
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn elapsed_time_is_monotonic() {
        let samples = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&samples);

        let mut frame_loop = FrameLoop::start(Duration::from_millis(1), move |t| {
            sink.lock().unwrap().push(t);
        })
        .unwrap();

        while samples.lock().unwrap().len() < 5 {
            thread::yield_now();
        }
        frame_loop.stop();

        let taken = samples.lock().unwrap();
        for pair in taken.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}
