use dtsprep_core::banner::{
    DEFAULT_INJECTED_PROPERTIES, DISABLE_BANNER, DISABLE_CLOSE, INJECTION_FOOTER, INJECTION_HEADER,
};
use dtsprep_core::{rewrite, RewriteOptions, StructurePolicy};
use dtsprep_test_utils::{lines_of, DEVICE_A, DEVICE_B, TRIGGER_LINE};
use proptest::prelude::*;

/// Lines that never trigger either machine
fn plain_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z#,-]{1,12} = <0x[0-9a-f]{1,8}>;",
        "[a-z_]{1,10}@[0-9a-f]{8} \\{",
        Just("};".to_string()),
        Just(String::new()),
        Just("\tcompatible = \"simple-bus\";".to_string()),
    ]
    .prop_map(|line| format!("{line}\n"))
}

/// Lines that may open, close or arm either machine
fn any_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => plain_line(),
        1 => Just(format!("\t\t{DEVICE_A}: phy@0 {{\n")),
        1 => Just(format!("\t\t{DEVICE_B}: phy@1 {{\n")),
        1 => Just("\t\taxi_fifo_mm_s@43c00000 {\n".to_string()),
        1 => Just(TRIGGER_LINE.to_string()),
        1 => Just("\t\t};\n".to_string()),
        1 => Just(format!("\t\t}}; {}", TRIGGER_LINE.trim_start())),
        1 => Just(format!("\t\t{DEVICE_A}: phy@2 {{ {}", TRIGGER_LINE.trim_start())),
    ]
}

/// Remove every line the engine generates, assuming no input line equals one
fn strip_generated(output: &str) -> String {
    let generated: Vec<&str> = DISABLE_BANNER
        .iter()
        .chain(INJECTION_HEADER.iter())
        .chain(DEFAULT_INJECTED_PROPERTIES.iter())
        .copied()
        .chain([DISABLE_CLOSE, INJECTION_FOOTER])
        .collect();
    lines_of(output)
        .into_iter()
        .filter(|line| !generated.contains(line))
        .collect()
}

proptest! {
    #[test]
    fn prop_plain_input_is_unchanged(lines in prop::collection::vec(plain_line(), 0..40)) {
        let source: String = lines.concat();
        let (out, report) = rewrite(&source, &RewriteOptions::default()).unwrap();

        prop_assert_eq!(out, source);
        prop_assert_eq!(report.counters.blocks_disabled, 0);
        prop_assert_eq!(report.counters.nodes_injected, 0);
    }

    #[test]
    fn prop_every_input_line_written_once(lines in prop::collection::vec(any_line(), 0..60)) {
        let source: String = lines.concat();
        let options = RewriteOptions::default().with_policy(StructurePolicy::BestEffort);
        let (out, report) = rewrite(&source, &options).unwrap();

        prop_assert_eq!(strip_generated(&out), source);
        prop_assert_eq!(report.counters.lines_read, lines.len());
    }

    #[test]
    fn prop_counters_match_generated_text(lines in prop::collection::vec(any_line(), 0..60)) {
        let source: String = lines.concat();
        let options = RewriteOptions::default().with_policy(StructurePolicy::BestEffort);
        let (out, report) = rewrite(&source, &options).unwrap();

        prop_assert_eq!(out.matches(DISABLE_BANNER[1]).count(), report.counters.blocks_disabled);
        prop_assert_eq!(out.matches(INJECTION_HEADER[1]).count(), report.counters.nodes_injected);
        prop_assert_eq!(report.disabled.len() + usize::from(report.unclosed_block.is_some()),
            report.counters.blocks_disabled);
    }

    #[test]
    fn prop_second_pass_is_noop(lines in prop::collection::vec(any_line(), 0..60)) {
        let source: String = lines.concat();
        let options = RewriteOptions::default().with_policy(StructurePolicy::BestEffort);
        let (first, report) = rewrite(&source, &options).unwrap();
        // an unclosed or nested span leaves a comment the second pass cannot see through
        prop_assume!(!report.has_structure_warnings());

        let (second, again) = rewrite(&first, &options).unwrap();
        prop_assert_eq!(second, first);
        prop_assert!(again.is_noop());
    }

    #[test]
    fn prop_strict_accepts_only_well_formed(lines in prop::collection::vec(any_line(), 0..60)) {
        let source: String = lines.concat();
        let lenient = RewriteOptions::default().with_policy(StructurePolicy::BestEffort);
        let (_, report) = rewrite(&source, &lenient).unwrap();

        let strict = rewrite(&source, &RewriteOptions::default());
        prop_assert_eq!(strict.is_ok(), !report.has_structure_warnings());
    }
}
