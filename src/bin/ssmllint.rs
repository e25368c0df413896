//! ssmllint: parse, check and re-emit SSML documents.
//!
//! Modelled on `xmllint`: every file is parsed, reported on, and (unless
//! `--noout` is given) written back out in normalized form.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use ssmloxide::parser::{parse_ssml_bytes, ParseOptions};
use ssmloxide::serial::{serialize_with_options, SerializeOptions};
use ssmloxide::Node;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// ssmllint -- parse, check and normalize SSML files.
#[derive(Parser, Debug)]
#[command(name = "ssmllint", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// SSML files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    // -- Parsing options ---------------------------------------------------
    /// Root element name the document must use.
    #[arg(long, value_name = "NAME", default_value = "speak")]
    root: String,

    /// Maximum tag nesting depth.
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    // -- Output options ----------------------------------------------------
    /// Do not output the result.
    #[arg(long)]
    noout: bool,

    /// Write childless tags as `<name/>`.
    #[arg(long)]
    collapse_empty: bool,

    /// Print the spoken text with all markup removed.
    #[arg(long)]
    text: bool,

    /// Print an indented dump of the parsed tree.
    #[arg(long)]
    debug: bool,

    /// Save output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Log timing information for reading, parsing and serializing.
    #[arg(long)]
    timing: bool,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_PARSE_ERROR: u8 = 1;
const EXIT_WRITE_ERROR: u8 = 2;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut worst_exit: u8 = EXIT_SUCCESS;
    for file in &cli.files {
        let exit = process_file(&cli, file);
        if exit > worst_exit {
            worst_exit = exit;
        }
    }

    ExitCode::from(worst_exit)
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

/// Processes a single input file and returns an exit code.
fn process_file(cli: &Cli, filename: &str) -> u8 {
    // -- Read input --------------------------------------------------------
    let start_read = Instant::now();

    let input = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            error!("{filename}: failed to read: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    if cli.timing {
        info!("reading {filename} took {:?}", start_read.elapsed());
    }

    // -- Parse -------------------------------------------------------------
    let start_parse = Instant::now();

    let mut opts = ParseOptions::default().root_name(cli.root.as_str());
    if let Some(max) = cli.max_depth {
        opts = opts.max_depth(max);
    }

    let root = match parse_ssml_bytes(&input, &opts) {
        Ok(root) => root,
        Err(e) => {
            error!("{filename}: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    if cli.timing {
        info!("parsing took {:?}", start_parse.elapsed());
    }
    debug!("{filename}: parsed {} nodes", root.descendants().count());

    if cli.noout {
        return EXIT_SUCCESS;
    }

    // -- Output ------------------------------------------------------------
    let start_serial = Instant::now();

    let output = if cli.debug {
        format_debug_tree(&root)
    } else if cli.text {
        let mut text = root.text_content();
        text.push('\n');
        text
    } else {
        let opts = SerializeOptions::default().collapse_empty(cli.collapse_empty);
        let mut markup = serialize_with_options(&root, &opts);
        markup.push('\n');
        markup
    };

    if cli.timing {
        info!("serializing took {:?}", start_serial.elapsed());
    }

    match write_output(cli, &output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let target = cli.output.as_deref().unwrap_or("<stdout>");
            error!("{target}: failed to write: {e}");
            EXIT_WRITE_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Input reading
// ---------------------------------------------------------------------------

/// Reads raw bytes from a file or stdin (when filename is `-`).
fn read_input(filename: &str) -> io::Result<Vec<u8>> {
    if filename == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(filename)
    }
}

// ---------------------------------------------------------------------------
// Debug tree output
// ---------------------------------------------------------------------------

fn format_debug_tree(root: &Node) -> String {
    let mut output = String::new();
    format_debug_node(root, 0, &mut output);
    output
}

fn format_debug_node(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Tag(tag) => {
            let _ = writeln!(out, "{indent}TAG {}", tag.name);
            for attr in &tag.attributes {
                let _ = writeln!(out, "{indent}  ATTRIBUTE {}={}", attr.name, attr.value);
            }
            for child in &tag.children {
                format_debug_node(child, depth + 1, out);
            }
        }
        Node::Text { content } => {
            // Newlines escaped so each node stays on one line.
            let _ = writeln!(out, "{indent}TEXT {}", content.replace('\n', "\\n"));
        }
    }
}

// ---------------------------------------------------------------------------
// Output writing
// ---------------------------------------------------------------------------

/// Writes output to stdout or to the file specified by --output.
fn write_output(cli: &Cli, content: &str) -> io::Result<()> {
    if let Some(ref output_file) = cli.output {
        fs::write(output_file, content)
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()
    }
}
