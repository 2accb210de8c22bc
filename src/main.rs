// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The geocalc command line tool.
//!
//! Parses the command line, runs the requested calculation and prints the
//! result on stdout. Errors are reported on stderr with a failure exit
//! code; the solvers themselves never print or exit.

use clap::Parser;
use geocalc::cli::{self, Cli};
use log::LevelFilter;
use std::process::ExitCode;

/// Map the repeatable -v and -q options onto a log level filter.
/// The default is warnings only.
fn verbosity_filter(verbose: u8, quiet: u8) -> LevelFilter {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = env_logger::Builder::from_default_env()
        .filter_level(verbosity_filter(cli.verbose, cli.quiet))
        .try_init();

    match cli::run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("geocalc: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(LevelFilter::Warn, verbosity_filter(0, 0));
        assert_eq!(LevelFilter::Info, verbosity_filter(1, 0));
        assert_eq!(LevelFilter::Debug, verbosity_filter(2, 0));
        assert_eq!(LevelFilter::Trace, verbosity_filter(3, 0));
        assert_eq!(LevelFilter::Trace, verbosity_filter(9, 0));
        assert_eq!(LevelFilter::Error, verbosity_filter(0, 1));
        assert_eq!(LevelFilter::Off, verbosity_filter(0, 2));
        assert_eq!(LevelFilter::Warn, verbosity_filter(2, 2));
    }
}
