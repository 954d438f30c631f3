use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Periodic tick on a background thread. `stop` cancels the tick and joins
/// the thread, so no tick is delivered once it returns.
pub struct Ticker {
    cancel: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Ticker
    where
        F: FnMut() + Send + 'static,
    {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match cancelled.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => on_tick(),
                _ => break,
            }
        });
        Ticker {
            cancel: Some(cancel),
            handle: Some(handle),
        }
    }

    /// Idempotent; the first call wakes the thread and waits for it to exit.
    pub fn stop(&mut self) {
        drop(self.cancel.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("[Timer] Tick thread panicked before shutdown.");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
