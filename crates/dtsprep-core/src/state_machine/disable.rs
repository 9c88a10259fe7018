//! Block-disable state machine
//!
//! Wraps each target device block in a comment. The banner is emitted
//! before the matching line, which then passes through into the open
//! comment; the closing line is written together with the comment closer.

use crate::action::{Action, Transition};
use crate::banner::{is_disable_opener, DISABLE_BANNER, DISABLE_CLOSE};
use crate::line::{strip_terminator, LineView};
use crate::matcher::LineMatcher;

/// A device block currently being commented out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableSpan {
    device: String,
    opened_at: usize,
    log: Vec<String>,
}

impl DisableSpan {
    fn open(device: &str, line: &str, opened_at: usize) -> Self {
        let mut span = Self {
            device: device.to_string(),
            opened_at,
            log: Vec::new(),
        };
        span.record_boundary(line);
        span
    }

    /// Device the block belongs to
    #[inline]
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Line where the span opened (1-based)
    #[inline]
    #[must_use]
    pub fn opened_at(&self) -> usize {
        self.opened_at
    }

    /// Diagnostic log of every line inside the span
    #[inline]
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Consume the span, keeping only its log
    #[inline]
    #[must_use]
    pub fn into_log(self) -> Vec<String> {
        self.log
    }

    fn record_boundary(&mut self, line: &str) {
        self.log.push(format!("-\t{}", strip_terminator(line).trim_start_matches('\t')));
    }

    fn record_inner(&mut self, line: &str) {
        self.log.push(format!("-\t\t{}", strip_terminator(line).trim_start_matches('\t')));
    }
}

/// State of the block-disable machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisableState {
    /// Looking for a target device
    #[default]
    Idle,
    /// Inside a commented-out block
    InsideSpan(DisableSpan),
    /// Inside a block commented out by an earlier run
    InsidePrevious {
        /// Matched device
        device: String,
        /// Line of the match
        opened_at: usize,
    },
}

impl DisableState {
    /// Open span, if any
    #[inline]
    #[must_use]
    pub fn span(&self) -> Option<&DisableSpan> {
        match self {
            Self::Idle | Self::InsidePrevious { .. } => None,
            Self::InsideSpan(span) => Some(span),
        }
    }
}

/// Events reported by the block-disable machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisableEvent {
    /// A block started; the banner was emitted
    Opened {
        /// Matched device
        device: String,
        /// Line of the match
        line: usize,
    },
    /// A block ended; carries the finished span and its log
    Closed {
        /// The finished span
        span: DisableSpan,
        /// Line of the closing token
        line: usize,
    },
    /// The device line already sits behind a banner from an earlier run
    AlreadyDisabled {
        /// Matched device
        device: String,
        /// Line of the match
        line: usize,
    },
    /// A target device matched while a span was open
    Nested {
        /// Device matched by the nested line
        device: String,
        /// Line of the nested match
        line: usize,
    },
}

/// Feed one line to the block-disable machine
pub fn step<M>(state: DisableState, matcher: &M, line: LineView<'_>) -> Transition<DisableState, DisableEvent>
where
    M: LineMatcher + ?Sized,
{
    let text = line.text();
    match state {
        DisableState::Idle => {
            let Some(device) = matcher.target_device(text) else {
                return Transition::pass(DisableState::Idle);
            };

            if line.prev().is_some_and(is_disable_opener) {
                let state = DisableState::InsidePrevious {
                    device: device.to_string(),
                    opened_at: line.number(),
                };
                return Transition::pass(state).with_event(DisableEvent::AlreadyDisabled {
                    device: device.to_string(),
                    line: line.number(),
                });
            }

            let span = DisableSpan::open(device, text, line.number());
            Transition::act(DisableState::InsideSpan(span), Action::emit(&DISABLE_BANNER)).with_event(
                DisableEvent::Opened {
                    device: device.to_string(),
                    line: line.number(),
                },
            )
        }
        // the closer is already in the input; only claim the line
        DisableState::InsidePrevious { device, opened_at } => {
            if matcher.closes_block(text) {
                Transition::act(DisableState::Idle, Action::Replace(vec![text.to_string()]))
            } else {
                Transition::pass(DisableState::InsidePrevious { device, opened_at })
            }
        }
        DisableState::InsideSpan(mut span) => {
            if matcher.closes_block(text) {
                span.record_boundary(text);
                let action = Action::Replace(vec![text.to_string(), DISABLE_CLOSE.to_string()]);
                return Transition::act(DisableState::Idle, action).with_event(DisableEvent::Closed {
                    span,
                    line: line.number(),
                });
            }

            let nested = matcher.target_device(text).map(ToString::to_string);
            span.record_inner(text);
            let transition = Transition::pass(DisableState::InsideSpan(span));
            match nested {
                Some(device) => transition.with_event(DisableEvent::Nested {
                    device,
                    line: line.number(),
                }),
                None => transition,
            }
        }
    }
}
