//! Line transformer - the single-pass orchestrator
//!
//! For every line the block-disable machine runs first, then the
//! property-injection machine. Lines either machine emits ahead of the
//! current line are written first; if a machine replaced the line, the
//! default pass-through is skipped. Every input line therefore reaches the
//! sink exactly once.
//!
//! ```text
//! SourceLines ─→ disable::step ─→ inject::step ─→ sink
//!                     │                │
//!                     └──── events ────┴─→ RewriteReport
//! ```

use crate::action::Action;
use crate::error::{RewriteError, RewriteResult};
use crate::line::{strip_terminator, LineView, SourceLines};
use crate::matcher::{LineMatcher, SubstringMatcher};
use crate::options::{RewriteOptions, StructurePolicy};
use crate::report::{DisabledBlock, InjectedNode, RewriteReport};
use crate::state_machine::{disable, inject, DisableEvent, DisableState, InjectEvent, InjectState};
use std::io::Write;

/// Mutable state of one pass
///
/// Created fresh for every run and dropped at the end of it.
#[derive(Debug, Default)]
pub struct TransformContext {
    disable: DisableState,
    inject: InjectState,
    report: RewriteReport,
}

impl TransformContext {
    /// Create an empty context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block-disable state
    #[inline]
    #[must_use]
    pub fn disable_state(&self) -> &DisableState {
        &self.disable
    }

    /// Current property-injection state
    #[inline]
    #[must_use]
    pub fn inject_state(&self) -> &InjectState {
        &self.inject
    }

    /// Report accumulated so far
    #[inline]
    #[must_use]
    pub fn report(&self) -> &RewriteReport {
        &self.report
    }
}

/// Rewrites a device-tree source in one pass
#[derive(Debug, Clone)]
pub struct LineTransformer<M = SubstringMatcher> {
    options: RewriteOptions,
    matcher: M,
}

impl LineTransformer<SubstringMatcher> {
    /// Create transformer using the substring matcher built from `options`
    #[must_use]
    pub fn new(options: RewriteOptions) -> Self {
        let matcher = SubstringMatcher::new(options.patterns.clone());
        Self { options, matcher }
    }
}

impl Default for LineTransformer<SubstringMatcher> {
    fn default() -> Self {
        Self::new(RewriteOptions::default())
    }
}

impl<M: LineMatcher> LineTransformer<M> {
    /// Create transformer with a custom matcher
    ///
    /// `options.patterns` is ignored; the matcher decides.
    #[inline]
    #[must_use]
    pub fn with_matcher(options: RewriteOptions, matcher: M) -> Self {
        Self { options, matcher }
    }

    /// Options in use
    #[inline]
    #[must_use]
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite `source` into `sink`
    ///
    /// # Errors
    /// - `RewriteError::UnterminatedBlock` / `NestedBlock` under the strict policy
    /// - `RewriteError::Write` if the sink fails
    ///
    /// On error the sink may hold partial output.
    pub fn run<W: Write>(&self, source: &str, sink: &mut W) -> RewriteResult<RewriteReport> {
        let lines = SourceLines::split(source);
        let _span = tracing::debug_span!("rewrite", lines = lines.len()).entered();

        let mut ctx = TransformContext::new();
        for line in lines.views() {
            self.process_line(&mut ctx, line, sink)?;
        }
        sink.flush()?;

        self.finish(ctx)
    }

    /// Rewrite `source` into a new string
    ///
    /// # Errors
    /// Same as [`LineTransformer::run`].
    pub fn rewrite(&self, source: &str) -> RewriteResult<(String, RewriteReport)> {
        let mut buf = Vec::with_capacity(source.len() + 512);
        let report = self.run(source, &mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok((text, report))
    }

    /// Feed one line through both machines and write the result
    ///
    /// # Errors
    /// Same as [`LineTransformer::run`], minus the end-of-input checks.
    pub fn process_line<W: Write>(
        &self,
        ctx: &mut TransformContext,
        line: LineView<'_>,
        sink: &mut W,
    ) -> RewriteResult<()> {
        ctx.report.counters.lines_read += 1;

        let disabled = disable::step(std::mem::take(&mut ctx.disable), &self.matcher, line);
        ctx.disable = disabled.state;
        if let Some(event) = disabled.event {
            self.on_disable_event(ctx, event)?;
        }
        write_lines(ctx, sink, disabled.action.lines())?;
        // a span close owns the line, on the first run and on re-runs
        if disabled.action.replaces_line() {
            return Ok(());
        }

        let injected = inject::step(
            std::mem::take(&mut ctx.inject),
            &self.matcher,
            &self.options.injected_properties,
            line,
        );
        ctx.inject = injected.state;
        if let Some(event) = injected.event {
            self.on_inject_event(ctx, event);
        }

        match injected.action {
            Action::Replace(lines) => write_lines(ctx, sink, &lines),
            Action::EmitLines(lines) => {
                write_lines(ctx, sink, &lines)?;
                write_line(ctx, sink, line.text())
            }
            Action::PassThrough => write_line(ctx, sink, line.text()),
        }
    }

    fn on_disable_event(&self, ctx: &mut TransformContext, event: DisableEvent) -> RewriteResult<()> {
        match event {
            DisableEvent::Opened { device, line } => {
                ctx.report.counters.blocks_disabled += 1;
                tracing::debug!(%device, line, "disable span opened");
            }
            DisableEvent::Closed { span, line } => {
                tracing::debug!(device = span.device(), line, "disable span closed");
                ctx.report.disabled.push(DisabledBlock {
                    device: span.device().to_string(),
                    first_line: span.opened_at(),
                    last_line: line,
                    log: span.into_log(),
                });
            }
            DisableEvent::AlreadyDisabled { device, line } => {
                ctx.report.counters.blocks_already_disabled += 1;
                tracing::debug!(%device, line, "device already commented out");
            }
            DisableEvent::Nested { device, line } => {
                let (open_device, opened_at) = ctx
                    .disable
                    .span()
                    .map(|span| (span.device().to_string(), span.opened_at()))
                    .unwrap_or_default();
                match self.options.policy {
                    StructurePolicy::Strict => {
                        return Err(RewriteError::NestedBlock {
                            device,
                            line,
                            open_device,
                            opened_at,
                        });
                    }
                    StructurePolicy::BestEffort => {
                        tracing::warn!(%device, line, %open_device, opened_at, "device nested inside open block");
                        ctx.report.nested_matches.push((device, line));
                    }
                }
            }
        }
        Ok(())
    }

    fn on_inject_event(&self, ctx: &mut TransformContext, event: InjectEvent) {
        match event {
            InjectEvent::NodeFound(node) => {
                ctx.report.counters.fifo_nodes_seen += 1;
                if node.name().is_empty() {
                    tracing::warn!(line = node.opened_at(), "can't get FIFO name from line");
                }
                tracing::debug!(node = node.name(), line = node.opened_at(), "FIFO node found");
            }
            InjectEvent::Injected { node, line } => {
                ctx.report.counters.nodes_injected += 1;
                tracing::debug!(node = node.name(), line, "properties injected");
                ctx.report.injected.push(InjectedNode {
                    name: node.name().to_string(),
                    node_line: node.opened_at(),
                    trigger_line: line,
                    properties: self
                        .options
                        .injected_properties
                        .iter()
                        .map(|p| strip_terminator(p).trim_start_matches('\t').to_string())
                        .collect(),
                });
            }
            InjectEvent::AlreadyInjected { node, line } => {
                ctx.report.counters.nodes_already_injected += 1;
                tracing::debug!(node = node.name(), line, "FIFO node already carries properties");
            }
            InjectEvent::NodeWhilePending { pending, line } => {
                ctx.report.counters.fifo_nodes_seen += 1;
                tracing::warn!(
                    pending = pending.name(),
                    pending_line = pending.opened_at(),
                    line,
                    "FIFO node found while another is waiting for its trigger"
                );
            }
        }
    }

    fn finish(&self, ctx: TransformContext) -> RewriteResult<RewriteReport> {
        let TransformContext {
            disable,
            inject,
            mut report,
        } = ctx;

        if let DisableState::InsidePrevious { device, opened_at } = &disable {
            tracing::debug!(%device, opened_at, "earlier commented block runs to end of file");
        }
        if let DisableState::InsideSpan(span) = disable {
            match self.options.policy {
                StructurePolicy::Strict => {
                    return Err(RewriteError::unterminated(span.device(), span.opened_at()));
                }
                StructurePolicy::BestEffort => {
                    tracing::warn!(
                        device = span.device(),
                        opened_at = span.opened_at(),
                        "block never closed; comment left open to end of file"
                    );
                    report.unclosed_block = Some(span);
                }
            }
        }

        if let InjectState::PendingInjection(node) = inject {
            tracing::warn!(
                node = node.name(),
                line = node.opened_at(),
                "FIFO node never reached its trigger line"
            );
            report.pending_node = Some(node);
        }

        tracing::info!(
            blocks_disabled = report.counters.blocks_disabled,
            nodes_injected = report.counters.nodes_injected,
            lines_read = report.counters.lines_read,
            lines_written = report.counters.lines_written,
            "rewrite pass finished"
        );
        Ok(report)
    }
}

/// Rewrite `source` with `options` using the default matcher
///
/// # Errors
/// Same as [`LineTransformer::run`].
pub fn rewrite(source: &str, options: &RewriteOptions) -> RewriteResult<(String, RewriteReport)> {
    LineTransformer::new(options.clone()).rewrite(source)
}

fn write_line<W: Write>(ctx: &mut TransformContext, sink: &mut W, line: &str) -> RewriteResult<()> {
    sink.write_all(line.as_bytes())?;
    ctx.report.counters.lines_written += 1;
    Ok(())
}

fn write_lines<W: Write, S: AsRef<str>>(
    ctx: &mut TransformContext,
    sink: &mut W,
    lines: &[S],
) -> RewriteResult<()> {
    for line in lines {
        write_line(ctx, sink, line.as_ref())?;
    }
    Ok(())
}
