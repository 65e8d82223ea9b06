//! Terminal input thread.
//!
//! Polls crossterm with a short timeout so the thread notices shutdown, and
//! forwards every event into a bounded channel. A full channel blocks the
//! thread, which applies back-pressure to the terminal instead of dropping
//! keys.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, bounded};
use crossterm::event::{self, Event};
use tracing::{debug, error};

pub const INPUT_CHANNEL_CAP: usize = 256;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn() -> Result<(Self, Receiver<Event>)> {
        let (tx, rx) = bounded(INPUT_CHANNEL_CAP);
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("ferrite-input".into())
            .spawn(move || read_loop(&tx, &flag))?;
        Ok((
            Self {
                stop,
                handle: Some(handle),
            },
            rx,
        ))
    }

    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!(target: "runtime.input", "input_thread_panicked");
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_loop(tx: &Sender<Event>, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                error!(target: "runtime.input", error = %err, "poll_failed");
                break;
            }
        }
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                error!(target: "runtime.input", error = %err, "read_failed");
                break;
            }
        }
    }
    debug!(target: "runtime.input", "input_thread_exit");
}
