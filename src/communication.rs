use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use chrono::NaiveDateTime;
use eframe::egui::Context;

/// what the clock's tickers send to the ui thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// the 1 Hz wall clock tick, stamped with the local time it fired at
    Second(NaiveDateTime),
    /// the 100 Hz stopwatch tick
    StopwatchStep,
}

/// Sends whatever `next` produces every `period` from its own thread until dropped.
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// `ctx` gets a repaint request after every tick so the ui picks the event up
    #[must_use]
    pub fn spawn<T, F>(
        period: Duration,
        mut next: F,
        sender: Sender<T>,
        ctx: Option<Context>,
    ) -> Self
    where
        T: Send + 'static,
        F: FnMut() -> T + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stopped.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    // the ui went away
                    if sender.send(next()).is_err() {
                        break;
                    }
                    if let Some(ctx) = &ctx {
                        ctx.request_repaint();
                    }
                }
                // dropping the ticker disconnects the stop channel
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("ticker thread panicked");
            }
        }
    }
}
