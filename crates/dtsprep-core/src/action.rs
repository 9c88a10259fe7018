//! Step results shared by both state machines

/// What a state machine asks the orchestrator to write for one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    /// Nothing extra; the line is written by the default pass-through
    #[default]
    PassThrough,
    /// Write these lines first, then let the line pass through
    EmitLines(Vec<String>),
    /// Write these lines instead of the line; they already contain it
    Replace(Vec<String>),
}

impl Action {
    /// Build an [`Action::EmitLines`] from static text
    #[must_use]
    pub fn emit(lines: &[&str]) -> Self {
        Self::EmitLines(lines.iter().map(ToString::to_string).collect())
    }

    /// Whether the default pass-through must be skipped
    #[inline]
    #[must_use]
    pub fn replaces_line(&self) -> bool {
        matches!(self, Self::Replace(_))
    }

    /// Lines this action writes on its own
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Self::PassThrough => &[],
            Self::EmitLines(lines) | Self::Replace(lines) => lines,
        }
    }
}

/// Outcome of feeding one line to a state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, E> {
    /// State after the line
    pub state: S,
    /// Output requested for the line
    pub action: Action,
    /// Event worth reporting, if any
    pub event: Option<E>,
}

impl<S, E> Transition<S, E> {
    /// Move to `state` and let the line pass through
    #[inline]
    #[must_use]
    pub fn pass(state: S) -> Self {
        Self {
            state,
            action: Action::PassThrough,
            event: None,
        }
    }

    /// Move to `state` with the given action
    #[inline]
    #[must_use]
    pub fn act(state: S, action: Action) -> Self {
        Self {
            state,
            action,
            event: None,
        }
    }

    /// Attach an event
    #[inline]
    #[must_use]
    pub fn with_event(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }
}
