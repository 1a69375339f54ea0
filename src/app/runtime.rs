//! Blocking input thread feeding the application loop.

use crate::input::{poll_action, InputAction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to the running input thread
pub struct InputThread {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    /// Start polling the terminal, sending every bound action on `tx`
    ///
    /// The thread exits when [`InputThread::stop`] is called, when the
    /// receiver is dropped, or on a terminal error.
    pub fn spawn(tx: UnboundedSender<InputAction>, poll_interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                match poll_action(poll_interval) {
                    Ok(Some(action)) => {
                        if tx.send(action).is_err() {
                            break;
                        }
                    }
                    Ok(None) => continue,
                    Err(err) => {
                        log::error!("Input thread error: {}", err);
                        break;
                    }
                }
            }
            log::debug!("Input thread stopped");
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Ask the thread to stop and wait for it
    ///
    /// Returns within one poll interval.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Input thread panicked");
            }
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}
