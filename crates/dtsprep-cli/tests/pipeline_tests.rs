use dtsprep_cli::pipeline::{FPGA_HEADING, OS_DEV_HEADING};
use dtsprep_cli::{PrepConfig, PrepError, Preparer, Reporter, ToolError};
use dtsprep_core::banner::{DISABLE_BANNER, INJECTION_HEADER};
use dtsprep_core::RewriteError;
use dtsprep_test_utils::{bus_open, sample_pl_dtsi, write_fixture_tree, DEVICE_A};
use pretty_assertions::assert_eq;
use std::path::Path;

const NO_COMPILER: &str = "dtsprep-test-missing-dtc";

fn preparer(dir: &Path, ignore_errors: bool) -> Preparer<Vec<u8>> {
    let config = PrepConfig::new(dir)
        .with_ignore_errors(ignore_errors)
        .with_dtc_program(NO_COMPILER);
    Preparer::new(config, Reporter::new(Vec::new(), false))
}

fn console_text(preparer: Preparer<Vec<u8>>) -> String {
    String::from_utf8(preparer.into_reporter().into_inner()).unwrap()
}

fn unclosed_pl_dtsi() -> String {
    bus_open()
        .line(&format!("\t\t{DEVICE_A}: axi-ad9361@79020000 {{"))
        .line("\t\t\tcompatible = \"adi,axi-ad9361-6.00.a\";")
        .build()
}

#[test]
fn full_run_writes_rewritten_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

    let mut prep = preparer(dir.path(), false);
    let summary = prep.run().unwrap();

    assert_eq!(summary.rewrite.output, dir.path().join("mod_pl.dtsi"));
    assert_eq!(summary.rewrite.report.counters.blocks_disabled, 2);
    assert_eq!(summary.rewrite.report.counters.nodes_injected, 1);
    assert_eq!(summary.missing_files().count(), 0);

    let output = std::fs::read_to_string(&summary.rewrite.output).unwrap();
    assert_eq!(output.matches(DISABLE_BANNER[1]).count(), 2);
    assert_eq!(output.matches(INJECTION_HEADER[1]).count(), 1);

    // source is left alone
    let source = std::fs::read_to_string(dir.path().join("pl.dtsi")).unwrap();
    assert_eq!(source, sample_pl_dtsi());
}

#[test]
fn compiler_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

    let mut prep = preparer(dir.path(), false);
    let summary = prep.run().unwrap();

    assert!(matches!(summary.dtb, Err(ToolError::Spawn { .. })));
    let out = console_text(prep);
    assert!(out.contains("Can't create DTB file radiomodule.dtb"));
}

#[test]
fn console_output_follows_run_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

    let mut prep = preparer(dir.path(), false);
    prep.run().unwrap();
    let out = console_text(prep);

    let positions: Vec<usize> = [
        OS_DEV_HEADING,
        FPGA_HEADING,
        "Deleted next device",
        "Added to fifo axi_fifo_mm_s@43c00000",
        "Added data to 1 fifo",
        "Deleted 2 device(s)",
        "Can't create DTB file",
    ]
    .iter()
    .map(|needle| out.find(needle).unwrap())
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn missing_file_stops_strict_run() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();
    std::fs::remove_file(dir.path().join("qspi.dtsi")).unwrap();

    let err = preparer(dir.path(), false).run().unwrap_err();

    assert!(matches!(err, PrepError::MissingFile { ref path } if path.ends_with("qspi.dtsi")));
    assert_eq!(err.exit_code(), 1);
    assert!(!dir.path().join("mod_pl.dtsi").exists());
}

#[test]
fn missing_file_is_reported_when_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();
    std::fs::remove_file(dir.path().join("qspi.dtsi")).unwrap();
    std::fs::remove_file(dir.path().join("pcw.dtsi")).unwrap();

    let mut prep = preparer(dir.path(), true);
    let summary = prep.run().unwrap();

    let missing: Vec<_> = summary.missing_files().cloned().collect();
    assert_eq!(
        missing,
        vec![dir.path().join("qspi.dtsi"), dir.path().join("pcw.dtsi")]
    );
    assert!(dir.path().join("mod_pl.dtsi").is_file());
}

#[test]
fn missing_rewrite_target_is_always_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();
    std::fs::remove_file(dir.path().join("pl.dtsi")).unwrap();

    let err = preparer(dir.path(), true).run().unwrap_err();

    assert!(matches!(err, PrepError::MissingRewriteTarget { .. }));
}

#[test]
fn unclosed_block_fails_strict_run_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &unclosed_pl_dtsi()).unwrap();

    let err = preparer(dir.path(), false).run().unwrap_err();

    assert!(matches!(
        err,
        PrepError::Rewrite(RewriteError::UnterminatedBlock { .. })
    ));
    assert!(!dir.path().join("mod_pl.dtsi").exists());
}

#[test]
fn unclosed_block_is_tolerated_when_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_tree(dir.path(), &unclosed_pl_dtsi()).unwrap();

    let mut prep = preparer(dir.path(), true);
    let summary = prep.run().unwrap();

    assert!(summary.rewrite.report.unclosed_block.is_some());
    let out = console_text(prep);
    assert!(out.contains("is never closed"));
}

#[test]
fn nothing_to_change_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let plain = bus_open().line("\t};").line("};").build();
    write_fixture_tree(dir.path(), &plain).unwrap();

    let mut prep = preparer(dir.path(), false);
    let summary = prep.run().unwrap();

    let output = std::fs::read_to_string(&summary.rewrite.output).unwrap();
    assert_eq!(output, plain);
    let out = console_text(prep);
    assert!(out.contains("Didn't find any fifo in file"));
    assert!(out.contains("Didn't find needed devices in file"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    fn mode(path: &Path) -> u32 {
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn modes_are_adjusted() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

        preparer(dir.path(), false).run().unwrap();

        assert_eq!(mode(&dir.path().join("pl.dtsi")), 0o666);
        assert_eq!(mode(&dir.path().join("system-top.dts")), 0o666);
        assert_eq!(mode(&dir.path().join("mod_pl.dtsi")), 0o777);
    }

    #[test]
    fn successful_compiler_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

        let config = PrepConfig::new(dir.path()).with_dtc_program("true");
        let mut prep = Preparer::new(config, Reporter::new(Vec::new(), false));
        let summary = prep.run().unwrap();

        assert_eq!(summary.dtb.unwrap(), dir.path().join("radiomodule.dtb"));
        let out = console_text(prep);
        assert!(out.contains("DTB file \"radiomodule.dtb\" created successfully"));
    }

    #[test]
    fn failing_compiler_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_pl_dtsi()).unwrap();

        let config = PrepConfig::new(dir.path()).with_dtc_program("false");
        let summary = Preparer::new(config, Reporter::new(Vec::new(), false))
            .run()
            .unwrap();

        assert!(matches!(summary.dtb, Err(ToolError::ExitStatus { .. })));
    }
}
