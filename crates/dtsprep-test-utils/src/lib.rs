//! Testing utilities for the dtsprep workspace
//!
//! Device-tree fixtures and filesystem helpers shared by the crates' tests.

#![allow(missing_docs)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEVICE_A: &str = "sdra_axi_ad9361_a";
pub const DEVICE_B: &str = "sdrb_axi_ad9361_b";
pub const TRIGGER_LINE: &str = "\t\t\txlnx,use-tx-data = <0x1>;\n";

/// Files the OS developers supply
pub const OS_DEV_FILES: [&str; 7] = [
    "adi-fmcomms2.dtsi",
    "ethernet.dtsi",
    "pl_ad9361.dtsi",
    "pl_int_rs485.dtsi",
    "pl_software.dtsi",
    "qspi.dtsi",
    "system-top.dts",
];

/// Files exported by the FPGA toolchain
pub const FPGA_FILES: [&str; 3] = ["pcw.dtsi", "pl.dtsi", "zynq-7000.dtsi"];

/// Builds `pl.dtsi`-like sources line by line
#[derive(Debug, Clone, Default)]
pub struct DtsBuilder {
    text: String,
}

impl DtsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line; `\n` is added
    pub fn line(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// Append a device block with the given body properties
    pub fn device_block(self, device: &str, body: &[&str]) -> Self {
        let mut builder = self.line(&format!("\t\t{device}: axi-ad9361@79020000 {{"));
        for property in body {
            builder = builder.line(&format!("\t\t\t{property}"));
        }
        builder.line("\t\t};")
    }

    /// Append a FIFO node, optionally containing the trigger line
    pub fn fifo_node(self, address: &str, with_trigger: bool) -> Self {
        let mut builder = self
            .line(&format!("\t\taxi_fifo_mm_s_0: axi_fifo_mm_s@{address} {{"))
            .line("\t\t\tcompatible = \"xlnx,axi-fifo-mm-s-4.1\";")
            .line("\t\t\tinterrupt-parent = <&intc>;");
        if with_trigger {
            builder = builder.line(TRIGGER_LINE.trim_end_matches('\n'));
        }
        builder
            .line("\t\t\txlnx,use-rx-data = <0x1>;")
            .line("\t\t};")
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Opening of the `amba_pl` bus wrapping the generated nodes
pub fn bus_open() -> DtsBuilder {
    DtsBuilder::new()
        .line("/ {")
        .line("\tamba_pl: amba_pl {")
        .line("\t\t#address-cells = <1>;")
        .line("\t\t#size-cells = <1>;")
        .line("\t\tcompatible = \"simple-bus\";")
        .line("\t\tranges ;")
}

/// A realistic `pl.dtsi` with both target devices and one FIFO node
pub fn sample_pl_dtsi() -> String {
    bus_open()
        .device_block(DEVICE_A, &["compatible = \"adi,axi-ad9361-6.00.a\";", "reg = <0x79020000 0x10000>;"])
        .fifo_node("43c00000", true)
        .device_block(DEVICE_B, &["compatible = \"adi,axi-ad9361-6.00.a\";", "reg = <0x79040000 0x10000>;"])
        .line("\t};")
        .line("};")
        .build()
}

/// Create every required file under `dir`, with `pl.dtsi` set to `pl_dtsi`
pub fn write_fixture_tree(dir: &Path, pl_dtsi: &str) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for name in OS_DEV_FILES.iter().chain(FPGA_FILES.iter()) {
        let path = dir.join(name);
        let content = if *name == "pl.dtsi" {
            pl_dtsi.to_string()
        } else {
            format!("/* {name} */\n")
        };
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

/// Lines of `text`, terminators kept
pub fn lines_of(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
