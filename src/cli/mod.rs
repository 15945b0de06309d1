//! Command-line interface module

use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::client::ConversionClient;
use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::walk::{self, FileOutcome, WalkOptions, WalkReport};

/// Extension of the documents converted by the CLI
pub const SOURCE_EXT: &str = ".md";
/// Extension written for converted documents
pub const TARGET_EXT: &str = ".html";

pub const LICENSE: &str = "\
MIT License

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.";

const LONG_ABOUT: &str = "\
Convert the Markdown files found under HTDOCS to HTML.

CONFIG_JSON holds the options sent with every request to the conversion
server (see the pandoc-server API documentation for the root endpoint), e.g.

    {
        \"from\": \"markdown\",
        \"to\": \"html5\",
        \"standalone\": true
    }

HTDOCS is walked recursively. Each file ending in \".md\" is converted and
written to the same path with \".html\" in place of \".md\", so the directory
must be writable. A failed file is reported and the walk continues; the exit
status is 1 if any file failed.";

/// Convert a tree of Markdown files to HTML through a conversion server
#[derive(Parser, Debug, Clone)]
#[command(name = "md2html")]
#[command(version)]
#[command(about = "Convert a tree of Markdown files to HTML through a conversion server")]
#[command(long_about = LONG_ABOUT)]
pub struct Args {
    /// JSON file with the conversion server options
    #[arg(value_name = "CONFIG_JSON", required_unless_present = "license")]
    pub config: Option<PathBuf>,

    /// Directory containing the Markdown documents
    #[arg(value_name = "HTDOCS", required_unless_present = "license")]
    pub htdocs: Option<PathBuf>,

    /// Display license
    #[arg(long)]
    pub license: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress per-file output and info-level logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Stop at the first file that fails to convert
    #[arg(long)]
    pub fail_fast: bool,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Args {
    /// License text followed by the program version
    pub fn license_text() -> String {
        format!("{}\n\nmd2html {}", LICENSE, env!("CARGO_PKG_VERSION"))
    }
}

/// Log level used when `RUST_LOG` is not set
pub fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(
    verbose: bool,
    quiet: bool,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

/// Load the configuration and convert the document tree
pub fn run(args: &Args, config_path: &Path, htdocs: &Path) -> Result<WalkReport> {
    let config = ConversionConfig::load(config_path)?
        .with_verbose(args.verbose)
        .with_from("markdown")
        .with_to("html5");

    let client = match args.timeout {
        Some(secs) => ConversionClient::with_timeout(config, Duration::from_secs(secs)),
        None => ConversionClient::new(config),
    };
    let options = WalkOptions {
        fail_fast: args.fail_fast,
    };

    let report = walk::walk_with(&client, htdocs, SOURCE_EXT, TARGET_EXT, &options, |outcome| {
        match outcome {
            FileOutcome::Converted { source, target } => CliUtils::show_success(
                &format!("{} -> {}", relative(htdocs, source), relative(htdocs, target)),
                args.quiet,
            ),
            FileOutcome::Failed { source, error } => {
                CliUtils::show_error(&format!("{}: {}", relative(htdocs, source), error))
            }
        }
    })?;

    if !args.quiet {
        println!("Converted {} file(s)", report.converted.len());
    }
    Ok(report)
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &Error) {
    CliUtils::show_error(&error.user_message());

    if let Some(tip) = error.tip() {
        eprintln!("\nTip: {}", tip);
    }
    eprintln!("\nTry 'md2html --help' for usage information.");
}
