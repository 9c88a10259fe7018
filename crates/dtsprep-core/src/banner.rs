//! Fixed text written around disabled blocks and injected properties

/// Written before the first line of a disabled block; ends with the comment opener
pub const DISABLE_BANNER: [&str; 4] = [
    "/*-----------------------------------------*\n",
    " * DEVICE BELOW IS COMMENTED AUTOMATICALLY *\n",
    " *-----------------------------------------*/\n",
    "/*\n",
];

/// Written after the closing line of a disabled block
pub const DISABLE_CLOSE: &str = "*/\n";

/// Written after the trigger line, before the injected properties
pub const INJECTION_HEADER: [&str; 4] = [
    "/*------------------------------------------*\n",
    " *   PARAMS BELOW ARE ADDED AUTOMATICALLY   *\n",
    " *------------------------------------------*/\n",
    "/*+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++*/\n",
];

/// Written after the injected properties
pub const INJECTION_FOOTER: &str =
    "/*+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++*/\n";

/// Properties added to every FIFO node
pub const DEFAULT_INJECTED_PROPERTIES: [&str; 2] = [
    "\t\t\txlnx,tx-max-pkt-size = <511>;\n",
    "\t\t\txlnx,rx-min-pkt-size = <1>;\n",
];

/// Whether `line` is the comment opener that ends [`DISABLE_BANNER`]
#[inline]
#[must_use]
pub fn is_disable_opener(line: &str) -> bool {
    line.trim() == DISABLE_BANNER[3].trim()
}

/// Whether `line` is the first line of [`INJECTION_HEADER`]
#[inline]
#[must_use]
pub fn is_injection_header(line: &str) -> bool {
    line.trim_end() == INJECTION_HEADER[0].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_lines_are_terminated() {
        let mut all: Vec<&str> = Vec::new();
        all.extend(DISABLE_BANNER);
        all.extend(INJECTION_HEADER);
        all.extend(DEFAULT_INJECTED_PROPERTIES);
        all.push(DISABLE_CLOSE);
        all.push(INJECTION_FOOTER);

        for line in all {
            assert!(line.ends_with('\n'), "{line:?}");
        }
    }

    #[test]
    fn markers_are_recognised() {
        assert!(is_disable_opener("/*\n"));
        assert!(is_disable_opener("  /*\r\n"));
        assert!(!is_disable_opener(DISABLE_BANNER[0]));

        assert!(is_injection_header(INJECTION_HEADER[0]));
        assert!(!is_injection_header(DISABLE_BANNER[0]));
    }
}
