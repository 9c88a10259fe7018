//! Rewrite configuration

use crate::banner::DEFAULT_INJECTED_PROPERTIES;
use crate::matcher::MatchPatterns;

/// How malformed disable spans are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructurePolicy {
    /// Fail on an unclosed span or a target nested inside an open span
    #[default]
    Strict,
    /// Keep going; the span stays open and the report records the problem
    BestEffort,
}

/// Options for one rewrite pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Matching rules for the default matcher
    pub patterns: MatchPatterns,
    /// Lines injected after each trigger line, terminators included
    pub injected_properties: Vec<String>,
    /// Treatment of malformed disable spans
    pub policy: StructurePolicy,
}

impl RewriteOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With structure policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: StructurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// With device names whose blocks get disabled
    #[must_use]
    pub fn with_target_devices<I, S>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.target_devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// With injected property lines
    ///
    /// A line missing its terminator gets `\n` appended.
    #[must_use]
    pub fn with_injected_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.injected_properties = properties
            .into_iter()
            .map(|p| {
                let mut line: String = p.into();
                if !line.ends_with('\n') {
                    line.push('\n');
                }
                line
            })
            .collect();
        self
    }
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            patterns: MatchPatterns::default(),
            injected_properties: DEFAULT_INJECTED_PROPERTIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            policy: StructurePolicy::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RewriteOptions::new();
        assert_eq!(options.policy, StructurePolicy::Strict);
        assert_eq!(options.injected_properties.len(), 2);
        assert_eq!(options.patterns.target_devices.len(), 2);
    }

    #[test]
    fn injected_properties_are_terminated() {
        let options = RewriteOptions::new().with_injected_properties(["a = <1>;", "b = <2>;\n"]);
        assert_eq!(options.injected_properties, vec!["a = <1>;\n", "b = <2>;\n"]);
    }
}
