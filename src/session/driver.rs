//! Wall-clock driver for a shared session.
//!
//! The driver thread wakes every `tick`, takes the session lock, and moves
//! the session clock to the wall-clock time elapsed since spawn. UI threads
//! take the same lock for their operations, so mutations stay serialized.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::controller::Session;

/// Session shared between a UI thread and the driver.
pub type SharedSession = Arc<Mutex<Session>>;

/// Background thread advancing a `SharedSession` in real time.
#[derive(Debug)]
pub struct RealtimeDriver {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RealtimeDriver {
    /// Start driving `session`, checking timers every `tick`.
    #[must_use]
    pub fn spawn(session: SharedSession, tick: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let started = Instant::now();
            let base = match session.lock() {
                Ok(s) => s.now(),
                Err(_) => return,
            };
            debug!(?tick, "realtime driver started");

            while !flag.load(Ordering::Acquire) {
                thread::sleep(tick);
                match session.lock() {
                    Ok(mut s) => {
                        s.advance_to(base + started.elapsed());
                    }
                    Err(_) => {
                        warn!("session lock poisoned, driver exiting");
                        break;
                    }
                }
            }
            debug!("realtime driver stopped");
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("realtime driver panicked");
            }
        }
    }
}

impl Drop for RealtimeDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
