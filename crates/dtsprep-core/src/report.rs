//! Summary of a rewrite pass

use crate::state_machine::{DisableSpan, FifoNode};

/// Counters accumulated over one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Device blocks wrapped in a comment
    pub blocks_disabled: usize,
    /// FIFO nodes that received properties
    pub nodes_injected: usize,
    /// FIFO node lines seen
    pub fifo_nodes_seen: usize,
    /// Device blocks already commented out by an earlier run
    pub blocks_already_disabled: usize,
    /// FIFO nodes already carrying injected properties
    pub nodes_already_injected: usize,
    /// Input lines consumed
    pub lines_read: usize,
    /// Output lines written, generated ones included
    pub lines_written: usize,
}

/// One disabled device block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisabledBlock {
    /// Device name that matched
    pub device: String,
    /// Line of the device match
    pub first_line: usize,
    /// Line of the closing token
    pub last_line: usize,
    /// Commented-out lines in diagnostic form
    pub log: Vec<String>,
}

/// One FIFO node that received properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedNode {
    /// Node name; empty when it could not be extracted
    pub name: String,
    /// Line of the node opening
    pub node_line: usize,
    /// Line of the trigger
    pub trigger_line: usize,
    /// Properties written after the trigger, terminators stripped
    pub properties: Vec<String>,
}

/// Outcome of a successful rewrite pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Counters
    pub counters: RunCounters,
    /// Disabled blocks in input order
    pub disabled: Vec<DisabledBlock>,
    /// Injected nodes in input order
    pub injected: Vec<InjectedNode>,
    /// Span left open at end of input (best-effort policy only)
    pub unclosed_block: Option<DisableSpan>,
    /// Target matches found inside an open span (best-effort policy only)
    pub nested_matches: Vec<(String, usize)>,
    /// FIFO node still waiting for its trigger at end of input
    pub pending_node: Option<FifoNode>,
}

impl RewriteReport {
    /// Whether the pass left the input unchanged
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.counters.blocks_disabled == 0 && self.counters.nodes_injected == 0
    }

    /// Whether malformed structure was tolerated during the pass
    #[inline]
    #[must_use]
    pub fn has_structure_warnings(&self) -> bool {
        self.unclosed_block.is_some() || !self.nested_matches.is_empty()
    }
}
