// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use testsum::{OutputWriter, TestsumApp};

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = TestsumApp::parse();
    let output = opts.init_output();

    match opts.exec(&mut OutputWriter::default()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
