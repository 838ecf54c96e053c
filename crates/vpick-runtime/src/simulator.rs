#![forbid(unsafe_code)]

//! Deterministic synchronous command executor.
//!
//! The simulator interprets commands inline on the calling thread: `Msg`
//! recurses into `update`, `Batch` runs in order, and `Task` closures
//! execute immediately with their result fed straight back in. Every run
//! over the same message sequence produces the same final state, which is
//! what integration tests want.

use crate::program::{Cmd, Model};

/// Synchronous executor around a [`Model`].
pub struct Simulator<M: Model> {
    model: M,
}

impl<M: Model> Simulator<M> {
    /// Wrap a model. Call [`Simulator::init`] before sending messages.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Run the model's `init()` commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.exec(cmd);
    }

    /// Deliver a message and execute every command it produces, to
    /// completion.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.exec(cmd);
    }

    /// Read the model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model (fixtures, direct assertions).
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Unwrap the model.
    #[must_use]
    pub fn into_model(self) -> M {
        self.model
    }

    fn exec(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(m) => {
                let next = self.model.update(m);
                self.exec(next);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.exec(c);
                }
            }
            Cmd::Task(f) => {
                let msg = f();
                let next = self.model.update(msg);
                self.exec(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: i32,
        inited: bool,
    }

    #[derive(Debug)]
    enum Msg {
        Add(i32),
        Nest(usize),
        Spawn,
        MarkInit,
    }

    impl Model for Counter {
        type Message = Msg;

        fn init(&mut self) -> Cmd<Msg> {
            Cmd::msg(Msg::MarkInit)
        }

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Add(n) => {
                    self.count += n;
                    Cmd::none()
                }
                Msg::Nest(depth) => {
                    self.count += 1;
                    if depth > 0 {
                        Cmd::msg(Msg::Nest(depth - 1))
                    } else {
                        Cmd::none()
                    }
                }
                Msg::Spawn => Cmd::task(|| Msg::Add(10)),
                Msg::MarkInit => {
                    self.inited = true;
                    Cmd::none()
                }
            }
        }
    }

    fn sim() -> Simulator<Counter> {
        Simulator::new(Counter {
            count: 0,
            inited: false,
        })
    }

    #[test]
    fn init_runs_startup_commands() {
        let mut sim = sim();
        sim.init();
        assert!(sim.model().inited);
    }

    #[test]
    fn nested_msg_executes_recursively() {
        let mut sim = sim();
        sim.send(Msg::Nest(3));
        assert_eq!(sim.model().count, 4);
    }

    #[test]
    fn task_runs_synchronously() {
        let mut sim = sim();
        sim.send(Msg::Spawn);
        assert_eq!(sim.model().count, 10);
    }

    #[test]
    fn batch_runs_in_order() {
        let mut sim = sim();
        let cmd = Cmd::batch(vec![Cmd::msg(Msg::Add(1)), Cmd::msg(Msg::Nest(1))]);
        sim.exec(cmd);
        assert_eq!(sim.model().count, 3);
    }

    #[test]
    fn into_model_returns_final_state() {
        let mut sim = sim();
        sim.send(Msg::Add(7));
        assert_eq!(sim.into_model().count, 7);
    }
}
