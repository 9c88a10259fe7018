//! Property-injection state machine
//!
//! A FIFO node line arms the machine; the next trigger line is written
//! followed by the injection header, the properties and the footer.

use crate::action::{Action, Transition};
use crate::banner::{is_injection_header, INJECTION_FOOTER, INJECTION_HEADER};
use crate::line::LineView;
use crate::matcher::LineMatcher;

/// A FIFO node waiting for its trigger line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoNode {
    name: String,
    opened_at: usize,
}

impl FifoNode {
    /// Create a node record
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, opened_at: usize) -> Self {
        Self {
            name: name.into(),
            opened_at,
        }
    }

    /// Node name; empty when it could not be extracted
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line of the node opening (1-based)
    #[inline]
    #[must_use]
    pub fn opened_at(&self) -> usize {
        self.opened_at
    }
}

/// State of the property-injection machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InjectState {
    /// Looking for a FIFO node
    #[default]
    Searching,
    /// Inside a FIFO node, waiting for the trigger line
    PendingInjection(FifoNode),
}

impl InjectState {
    /// Pending node, if any
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&FifoNode> {
        match self {
            Self::Searching => None,
            Self::PendingInjection(node) => Some(node),
        }
    }
}

/// Events reported by the property-injection machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectEvent {
    /// A FIFO node was entered
    NodeFound(FifoNode),
    /// Properties were written after the trigger line
    Injected {
        /// Node that received the properties
        node: FifoNode,
        /// Line of the trigger
        line: usize,
    },
    /// The trigger is already followed by an injection header
    AlreadyInjected {
        /// Node that already carries the properties
        node: FifoNode,
        /// Line of the trigger
        line: usize,
    },
    /// Another FIFO node line showed up while one was pending
    NodeWhilePending {
        /// Node still waiting for its trigger
        pending: FifoNode,
        /// Line of the ignored node
        line: usize,
    },
}

/// Feed one line to the property-injection machine
pub fn step<M>(
    state: InjectState,
    matcher: &M,
    properties: &[String],
    line: LineView<'_>,
) -> Transition<InjectState, InjectEvent>
where
    M: LineMatcher + ?Sized,
{
    let text = line.text();
    match state {
        InjectState::Searching => {
            if !matcher.opens_fifo_node(text) {
                return Transition::pass(InjectState::Searching);
            }
            let name = matcher.fifo_node_name(text).unwrap_or_default();
            let node = FifoNode::new(name, line.number());
            Transition::pass(InjectState::PendingInjection(node.clone()))
                .with_event(InjectEvent::NodeFound(node))
        }
        InjectState::PendingInjection(node) => {
            if matcher.is_injection_trigger(text) {
                if line.next().is_some_and(is_injection_header) {
                    return Transition::pass(InjectState::Searching).with_event(
                        InjectEvent::AlreadyInjected {
                            node,
                            line: line.number(),
                        },
                    );
                }
                let action = Action::Replace(injection_lines(text, properties));
                return Transition::act(InjectState::Searching, action).with_event(InjectEvent::Injected {
                    node,
                    line: line.number(),
                });
            }

            if matcher.opens_fifo_node(text) {
                return Transition::pass(InjectState::PendingInjection(node.clone())).with_event(
                    InjectEvent::NodeWhilePending {
                        pending: node,
                        line: line.number(),
                    },
                );
            }

            Transition::pass(InjectState::PendingInjection(node))
        }
    }
}

fn injection_lines(trigger: &str, properties: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(INJECTION_HEADER.len() + properties.len() + 2);
    lines.push(trigger.to_string());
    lines.extend(INJECTION_HEADER.iter().map(ToString::to_string));
    lines.extend(properties.iter().cloned());
    lines.push(INJECTION_FOOTER.to_string());
    lines
}
