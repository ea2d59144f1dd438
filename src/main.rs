//! Webbundle - command-line build tool for combining and minifying JS and CSS bundles

use std::process::ExitCode;

use webbundle::cli;

fn main() -> ExitCode {
    cli::run()
}
