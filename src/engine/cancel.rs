//! Ctrl+C handling: cancel the archive operation in flight, otherwise exit.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
}

impl CancelToken {
    /// Install the process-wide Ctrl+C handler. Call once.
    pub fn install_ctrlc(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            if token.in_flight.load(Ordering::Relaxed) {
                token.cancelled.store(true, Ordering::Relaxed);
            } else {
                eprintln!();
                std::process::exit(130);
            }
        })
        .context("set Ctrl+C handler")
    }

    /// Mark an operation as running until the guard drops.
    pub fn begin(&self) -> InFlight<'_> {
        self.in_flight.store(true, Ordering::Relaxed);
        InFlight { token: self }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

pub struct InFlight<'a> {
    token: &'a CancelToken,
}

/// Dropping ends the operation and consumes any cancel request made during it.
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.token.in_flight.store(false, Ordering::Relaxed);
        self.token.cancelled.store(false, Ordering::Relaxed);
    }
}
