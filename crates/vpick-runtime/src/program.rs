#![forbid(unsafe_code)]

//! Model trait and command type.
//!
//! A model is the single owner of its state. Messages drive transitions;
//! commands describe the side effects a transition wants, without
//! executing them. Executors ([`crate::Simulator`], [`crate::Dispatcher`])
//! interpret commands.

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// `Send + 'static` because task completions may cross a thread
    /// boundary on their way back to `update`.
    type Message: Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once before any message is delivered. Return commands to
    /// execute initial side effects like loading data.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands for
    /// any side effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;
}

/// Side effects to be executed by an executor.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Send a message back to the model.
    Msg(M),
    /// Execute multiple commands (sequentially).
    Batch(Vec<Cmd<M>>),
    /// Execute a potentially blocking operation off the mutating thread.
    ///
    /// The closure's return value is delivered to the model as a message.
    Task(Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Task(_) => write!(f, "Task(...)"),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a batch of commands, collapsing the trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        if cmds.is_empty() {
            Self::None
        } else if cmds.len() == 1 {
            cmds.into_iter().next().unwrap_or(Self::None)
        } else {
            Self::Batch(cmds)
        }
    }

    /// Create a background task command.
    ///
    /// The closure may run on a worker thread; its returned message is fed
    /// back into the model's `update()`.
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Box::new(f))
    }

    /// Whether this command does nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
