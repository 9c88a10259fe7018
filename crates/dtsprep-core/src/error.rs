//! Error types for the rewrite engine
//!
//! Covers the two structural failures the strict policy detects and
//! failures of the output sink.

/// Errors raised while rewriting a source file
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// A disable span was still open when the input ended
    #[error("block for device '{device}' opened at line {opened_at} is never closed")]
    UnterminatedBlock {
        /// Device whose block was being disabled
        device: String,
        /// Line where the span opened (1-based)
        opened_at: usize,
    },

    /// A target device matched while another disable span was open
    #[error(
        "device '{device}' at line {line} is nested inside the block for '{open_device}' opened at line {opened_at}"
    )]
    NestedBlock {
        /// Device matched by the nested line
        device: String,
        /// Line of the nested match (1-based)
        line: usize,
        /// Device of the span that is already open
        open_device: String,
        /// Line where the open span started (1-based)
        opened_at: usize,
    },

    /// The output sink rejected a write
    #[error("failed to write rewritten output: {0}")]
    Write(#[from] std::io::Error),
}

impl RewriteError {
    /// Create an unterminated block error
    pub fn unterminated(device: impl Into<String>, opened_at: usize) -> Self {
        Self::UnterminatedBlock {
            device: device.into(),
            opened_at,
        }
    }

    /// Whether the error comes from malformed input rather than I/O
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::UnterminatedBlock { .. } | Self::NestedBlock { .. })
    }
}

/// Result type alias for rewrite operations
pub type RewriteResult<T> = Result<T, RewriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unterminated_display() {
        let err = RewriteError::unterminated("sdra_axi_ad9361_a", 12);
        assert_eq!(
            err.to_string(),
            "block for device 'sdra_axi_ad9361_a' opened at line 12 is never closed"
        );
        assert!(err.is_structural());
    }

    #[test]
    fn io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: RewriteError = io.into();
        assert!(matches!(err, RewriteError::Write(_)));
        assert!(!err.is_structural());
    }
}
