//! Colored console reporting
//!
//! User-facing output goes here; diagnostics go through `tracing`.

use crate::error::ToolError;
use console::Style;
use dtsprep_core::{DisabledBlock, InjectedNode, RewriteReport};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Styles used by the reporter
#[derive(Debug, Clone)]
struct Palette {
    heading: Style,
    ok: Style,
    fail: Style,
    name: Style,
}

impl Palette {
    fn new(colored: bool) -> Self {
        let style = || Style::new().force_styling(colored);
        Self {
            heading: style().cyan(),
            ok: style().green(),
            fail: style().red(),
            name: style().yellow(),
        }
    }
}

/// Writes the run's progress and results to a terminal or buffer
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    palette: Palette,
}

impl Reporter<io::Stdout> {
    /// Reporter on stdout, colored when the terminal supports it
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), console::colors_enabled())
    }
}

impl<W: Write> Reporter<W> {
    /// Create reporter over `out`
    #[must_use]
    pub fn new(out: W, colored: bool) -> Self {
        Self {
            out,
            palette: Palette::new(colored),
        }
    }

    /// Underlying writer
    #[inline]
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the reporter, returning the writer
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Section heading
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}\n", self.palette.heading.apply_to(title))
    }

    /// Presence of one required file
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn file_status(&mut self, path: &Path, present: bool) -> io::Result<()> {
        let quoted = format!("\"{}\"", path.display());
        let (style, verdict) = if present {
            (&self.palette.ok, "exist")
        } else {
            (&self.palette.fail, "doesn't exist")
        };
        writeln!(
            self.out,
            "\t{} {} {}",
            style.apply_to("File"),
            self.palette.name.apply_to(quoted),
            style.apply_to(verdict)
        )
    }

    /// Lines of one commented-out device block
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn disabled_block(&mut self, block: &DisabledBlock) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} {}\n",
            self.palette.heading.apply_to("Deleted next device"),
            self.palette.name.apply_to(&block.device)
        )?;
        for line in &block.log {
            writeln!(self.out, "{}", self.palette.fail.apply_to(line))?;
        }
        Ok(())
    }

    /// Properties added to one FIFO node
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn injected_node(&mut self, node: &InjectedNode) -> io::Result<()> {
        if node.name.is_empty() {
            writeln!(self.out, "{}", self.palette.fail.apply_to("Can't get fifo name from line"))?;
        }
        writeln!(
            self.out,
            "\n{} {}\n",
            self.palette.heading.apply_to("Added to fifo"),
            self.palette.name.apply_to(&node.name)
        )?;
        for property in &node.properties {
            writeln!(self.out, "{}", self.palette.ok.apply_to(format!("+\t{property}")))?;
        }
        Ok(())
    }

    /// Every change of a pass, in the order the changes complete
    ///
    /// A block is listed when it closes, so a node injected inside a block
    /// comes before the block.
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn changes(&mut self, report: &RewriteReport) -> io::Result<()> {
        let mut disabled = report.disabled.iter().peekable();
        let mut injected = report.injected.iter().peekable();
        loop {
            match (disabled.peek(), injected.peek()) {
                (Some(block), Some(node)) if block.last_line < node.trigger_line => {
                    self.disabled_block(block)?;
                    disabled.next();
                }
                (_, Some(node)) => {
                    self.injected_node(node)?;
                    injected.next();
                }
                (Some(block), None) => {
                    self.disabled_block(block)?;
                    disabled.next();
                }
                (None, None) => return Ok(()),
            }
        }
    }

    /// Structure problems tolerated by a best-effort pass
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn structure_warnings(&mut self, report: &RewriteReport) -> io::Result<()> {
        if let Some(span) = &report.unclosed_block {
            let text = format!(
                "Block of device {} opened at line {} is never closed",
                span.device(),
                span.opened_at()
            );
            writeln!(self.out, "\n{}", self.palette.fail.apply_to(text))?;
        }
        for (device, line) in &report.nested_matches {
            let text = format!("Device {device} at line {line} is inside a block already being deleted");
            writeln!(self.out, "\n{}", self.palette.fail.apply_to(text))?;
        }
        if let Some(node) = &report.pending_node {
            let text = format!(
                "Fifo {} at line {} has no \"xlnx,use-tx-data\" line",
                node.name(),
                node.opened_at()
            );
            writeln!(self.out, "\n{}", self.palette.fail.apply_to(text))?;
        }
        Ok(())
    }

    /// Totals of a pass over `output`
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn summary(&mut self, output: &Path, report: &RewriteReport) -> io::Result<()> {
        let counters = &report.counters;
        let fifo = if counters.nodes_injected == 0 {
            self.palette
                .fail
                .apply_to(format!("Didn't find any fifo in file {}", output.display()))
        } else {
            self.palette
                .name
                .apply_to(format!("Added data to {} fifo", counters.nodes_injected))
        };
        writeln!(self.out, "\n{fifo}")?;

        let devices = if counters.blocks_disabled == 0 {
            self.palette
                .fail
                .apply_to(format!("Didn't find needed devices in file {}", output.display()))
        } else {
            self.palette
                .name
                .apply_to(format!("Deleted {} device(s)", counters.blocks_disabled))
        };
        writeln!(self.out, "{devices}\n")
    }

    /// Outcome of the compiler run
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn dtb_result(&mut self, dtb_name: &str, result: &Result<PathBuf, ToolError>) -> io::Result<()> {
        match result {
            Ok(_) => writeln!(
                self.out,
                "\n{} {} {}\n",
                self.palette.ok.apply_to("DTB file"),
                self.palette.name.apply_to(format!("\"{dtb_name}\"")),
                self.palette.ok.apply_to("created successfully")
            ),
            Err(e) => writeln!(
                self.out,
                "\n{}\n",
                self.palette.fail.apply_to(format!("Can't create DTB file {dtb_name}: {e}"))
            ),
        }
    }
}
