//! Line matching rules
//!
//! Block and node boundaries are found by substring containment, not by
//! parsing device-tree grammar. The rules sit behind [`LineMatcher`] so the
//! state machines never see how a match is decided.

/// Default devices whose blocks are commented out
pub const DEFAULT_TARGET_DEVICES: [&str; 2] = ["sdra_axi_ad9361_a", "sdrb_axi_ad9361_b"];

/// Default token that ends a device block
pub const DEFAULT_CLOSING_TOKEN: &str = "};";

/// Default pattern identifying a FIFO node line
pub const DEFAULT_FIFO_BASE: &str = "axi_fifo_mm_s@";

/// Default property line after which properties are injected
pub const DEFAULT_INJECTION_TRIGGER: &str = "xlnx,use-tx-data = <0x1>;";

/// Decides what a single line means to the state machines
pub trait LineMatcher {
    /// Target device named by the line; the first configured match wins
    fn target_device(&self, line: &str) -> Option<&str>;

    /// Whether the line ends the currently open device block
    fn closes_block(&self, line: &str) -> bool;

    /// Whether the line opens a FIFO node
    fn opens_fifo_node(&self, line: &str) -> bool;

    /// Whether the line is the injection point of a pending FIFO node
    fn is_injection_trigger(&self, line: &str) -> bool;

    /// Node name of a FIFO node line, used for diagnostics only
    fn fifo_node_name<'l>(&self, line: &'l str) -> Option<&'l str>;
}

/// Substrings the default matcher looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPatterns {
    /// Device names, in priority order
    pub target_devices: Vec<String>,
    /// Token closing a device block
    pub closing_token: String,
    /// Pattern of a FIFO node line
    pub fifo_base: String,
    /// Pattern of the injection trigger line
    pub injection_trigger: String,
}

impl Default for MatchPatterns {
    fn default() -> Self {
        Self {
            target_devices: DEFAULT_TARGET_DEVICES.iter().map(ToString::to_string).collect(),
            closing_token: DEFAULT_CLOSING_TOKEN.to_string(),
            fifo_base: DEFAULT_FIFO_BASE.to_string(),
            injection_trigger: DEFAULT_INJECTION_TRIGGER.to_string(),
        }
    }
}

/// Case-sensitive substring matcher
#[derive(Debug, Clone, Default)]
pub struct SubstringMatcher {
    patterns: MatchPatterns,
}

impl SubstringMatcher {
    /// Create matcher for the given patterns
    #[inline]
    #[must_use]
    pub fn new(patterns: MatchPatterns) -> Self {
        Self { patterns }
    }

    /// Patterns in use
    #[inline]
    #[must_use]
    pub fn patterns(&self) -> &MatchPatterns {
        &self.patterns
    }
}

impl LineMatcher for SubstringMatcher {
    fn target_device(&self, line: &str) -> Option<&str> {
        self.patterns
            .target_devices
            .iter()
            .find(|device| contains_pattern(line, device))
            .map(String::as_str)
    }

    fn closes_block(&self, line: &str) -> bool {
        contains_pattern(line, &self.patterns.closing_token)
    }

    fn opens_fifo_node(&self, line: &str) -> bool {
        contains_pattern(line, &self.patterns.fifo_base)
    }

    fn is_injection_trigger(&self, line: &str) -> bool {
        contains_pattern(line, &self.patterns.injection_trigger)
    }

    fn fifo_node_name<'l>(&self, line: &'l str) -> Option<&'l str> {
        let base = self.patterns.fifo_base.as_str();
        if base.is_empty() {
            return None;
        }
        // `label: name {` and `label:name{` both reduce to `name`
        line.split_whitespace()
            .flat_map(|token| token.split(':'))
            .find(|part| part.contains(base))
            .map(|part| part.trim_end_matches('{'))
            .filter(|name| !name.is_empty())
    }
}

/// An empty pattern matches nothing
fn contains_pattern(line: &str, pattern: &str) -> bool {
    !pattern.is_empty() && line.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_device_first_match_wins() {
        let matcher = SubstringMatcher::default();

        assert_eq!(
            matcher.target_device("\tsdra_axi_ad9361_a: ad9361-phy@0 {\n"),
            Some("sdra_axi_ad9361_a")
        );
        assert_eq!(
            matcher.target_device("sdrb_axi_ad9361_b sdra_axi_ad9361_a"),
            Some("sdra_axi_ad9361_a")
        );
        assert_eq!(matcher.target_device("axi_ad9361@79020000 {"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matcher = SubstringMatcher::default();
        assert_eq!(matcher.target_device("SDRA_AXI_AD9361_A {"), None);
    }

    #[test]
    fn empty_device_names_never_match() {
        let patterns = MatchPatterns {
            target_devices: vec![String::new()],
            ..MatchPatterns::default()
        };
        let matcher = SubstringMatcher::new(patterns);
        assert_eq!(matcher.target_device("anything"), None);
    }

    #[test]
    fn empty_patterns_never_match() {
        let matcher = SubstringMatcher::new(MatchPatterns {
            target_devices: Vec::new(),
            closing_token: String::new(),
            fifo_base: String::new(),
            injection_trigger: String::new(),
        });

        for line in ["axi_fifo_mm_s@40000000 {\n", "};\n", "xlnx,use-tx-data = <0x1>;\n", ""] {
            assert!(!matcher.closes_block(line));
            assert!(!matcher.opens_fifo_node(line));
            assert!(!matcher.is_injection_trigger(line));
            assert_eq!(matcher.fifo_node_name(line), None);
        }
    }

    #[test]
    fn closing_and_trigger_lines() {
        let matcher = SubstringMatcher::default();

        assert!(matcher.closes_block("\t\t};\n"));
        assert!(!matcher.closes_block("\t\t}\n"));
        assert!(matcher.is_injection_trigger("\t\t\txlnx,use-tx-data = <0x1>;\n"));
        assert!(!matcher.is_injection_trigger("\t\t\txlnx,use-tx-data = <0x0>;\n"));
    }

    #[test]
    fn fifo_node_name_plain() {
        let matcher = SubstringMatcher::default();
        assert!(matcher.opens_fifo_node("axi_fifo_mm_s@40000000 {"));
        assert_eq!(
            matcher.fifo_node_name("axi_fifo_mm_s@40000000 {"),
            Some("axi_fifo_mm_s@40000000")
        );
    }

    #[test]
    fn fifo_node_name_with_label() {
        let matcher = SubstringMatcher::default();
        assert_eq!(
            matcher.fifo_node_name("\t\taxi_fifo_mm_s_0: axi_fifo_mm_s@43c00000 {\n"),
            Some("axi_fifo_mm_s@43c00000")
        );
        assert_eq!(
            matcher.fifo_node_name("fifo:axi_fifo_mm_s@43c10000{"),
            Some("axi_fifo_mm_s@43c10000")
        );
    }

    #[test]
    fn fifo_node_name_missing() {
        let matcher = SubstringMatcher::default();
        assert_eq!(matcher.fifo_node_name("no fifo here"), None);
    }
}
