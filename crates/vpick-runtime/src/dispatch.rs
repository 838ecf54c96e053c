#![forbid(unsafe_code)]

//! Threaded command executor.
//!
//! `Task` closures run on spawned worker threads and report back over an
//! mpsc channel; everything else, including every `update` call, happens
//! on the thread that calls [`Dispatcher::pump`]. There is exactly one
//! writer to the model at any time.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, trace};

use crate::program::{Cmd, Model};

/// Cooperative executor that offloads `Task` commands to worker threads.
pub struct Dispatcher<M: Model> {
    sender: mpsc::Sender<M::Message>,
    receiver: mpsc::Receiver<M::Message>,
    handles: Vec<JoinHandle<()>>,
}

impl<M: Model> Default for Dispatcher<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Dispatcher<M> {
    /// Create a dispatcher with its completion channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            handles: Vec::new(),
        }
    }

    /// Run the model's `init()` commands.
    pub fn init(&mut self, model: &mut M) {
        let cmd = model.init();
        self.exec(model, cmd);
    }

    /// Deliver a message from the host and execute the resulting commands.
    pub fn send(&mut self, model: &mut M, msg: M::Message) {
        let cmd = model.update(msg);
        self.exec(model, cmd);
    }

    /// Drain task completions without blocking.
    ///
    /// Returns the number of completion messages delivered to the model.
    pub fn pump(&mut self, model: &mut M) -> usize {
        let mut delivered = 0;
        while let Ok(msg) = self.receiver.try_recv() {
            let cmd = model.update(msg);
            self.exec(model, cmd);
            delivered += 1;
        }
        self.reap_finished();
        delivered
    }

    /// Block up to `timeout` for one completion, then drain the rest.
    ///
    /// Returns the number of completion messages delivered to the model.
    pub fn pump_blocking(&mut self, model: &mut M, timeout: Duration) -> usize {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => {
                let cmd = model.update(msg);
                self.exec(model, cmd);
                1 + self.pump(model)
            }
            Err(_) => {
                self.reap_finished();
                0
            }
        }
    }

    /// Number of worker threads not yet reaped.
    #[must_use]
    pub fn inflight_tasks(&self) -> usize {
        self.handles.len()
    }

    fn exec(&mut self, model: &mut M, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(m) => {
                let next = model.update(m);
                self.exec(model, next);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.exec(model, c);
                }
            }
            Cmd::Task(f) => {
                trace!("spawning task worker");
                let sender = self.sender.clone();
                let handle = std::thread::spawn(move || {
                    // A send failure means the dispatcher was dropped; the
                    // result has nowhere to go.
                    let _ = sender.send(f());
                });
                self.handles.push(handle);
            }
        }
    }

    fn reap_finished(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        let before = self.handles.len();
        let mut remaining = Vec::with_capacity(before);
        for handle in self.handles.drain(..) {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                remaining.push(handle);
            }
        }
        if remaining.len() != before {
            debug!(reaped = before - remaining.len(), "reaped finished task workers");
        }
        self.handles = remaining;
    }
}
