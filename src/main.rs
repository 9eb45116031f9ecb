//! CLI for inline-cite - Detect and strip parenthesised citation links.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use inline_cite::{
    builtin_style, detect_and_strip, load_nodes, load_style, nodes::NodesError, parse_nodes,
    render_markdown,
    style::{builtin_style_names, DEFAULT_STYLE},
    to_json, CitationStyle, InlineNode,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Detect parenthesised citation links in inline Markdown nodes
#[derive(Parser)]
#[command(name = "inline-cite")]
#[command(version)]
#[command(after_help = "\
Examples:
  inline-cite process paragraph.json
  inline-cite process paragraph.json --style bracket -o paragraph.md
  inline-cite process paragraph.json --format json
  cat nodes.jsonl | inline-cite detect -
  inline-cite styles")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip citation parentheses and write the processed nodes
    #[command(after_help = "\
Examples:
  inline-cite process nodes.json
  inline-cite process nodes.json -s paren
  inline-cite process nodes.json -s my-style.toml -o out.md

Input: a JSON array of inline nodes, or JSONL with one node per line.
Node syntax: {\"kind\": \"text\", \"content\": \"See (\"}")]
    Process {
        /// Input node file (use '-' for stdin)
        input: PathBuf,

        /// Citation style: path to a .toml file, or builtin name (see 'styles' command)
        #[arg(short, long, default_value = DEFAULT_STYLE)]
        style: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the citation links of a node sequence
    Detect {
        /// Input node file (use '-' for stdin)
        input: PathBuf,
    },

    /// List available builtin citation styles
    Styles,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Inline Markdown with citations wrapped in the style markers
    Markdown,
    /// JSON report with citation indices and processed nodes
    Json,
}

// ---------------------------------------------------------------------------
// AppError: semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10: input file not found / unreadable
    InputFile(String),
    /// Exit 11: input is not a valid node sequence
    InvalidNodes(String),
    /// Exit 12: citation style not found / invalid
    Style(String),
    /// Exit 15: cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::InvalidNodes(_) => 11,
            AppError::Style(_) => 12,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::InvalidNodes(msg) => {
                write!(
                    f,
                    "{}\n  hint: the input must be a JSON array of inline nodes, or JSONL (one node object per line)",
                    msg
                )
            }
            AppError::Style(msg) => {
                let names = builtin_style_names().join(", ");
                write!(
                    f,
                    "{}\n  available builtin styles: {}\n  hint: provide a path to a .toml style file, or use a builtin style name",
                    msg, names
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Process {
            input,
            style,
            format,
            output,
        } => {
            process_command(&input, &style, format, output.as_deref())?;
        }
        Commands::Detect { input } => {
            detect_command(&input)?;
        }
        Commands::Styles => {
            styles_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Strip citation parentheses from a node sequence.
fn process_command(
    input: &Path,
    style: &str,
    format: Format,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Read and parse the node sequence (support '-' for stdin)
    let nodes = read_nodes(input)?;

    // 2. Resolve the style (builtin or file)
    let style = resolve_style(style)?;

    // 3. Detect citations and strip their parentheses
    let pass = detect_and_strip(&nodes);

    // 4. Generate output
    let result = match format {
        Format::Markdown => render_markdown(&pass, &style),
        Format::Json => to_json(&pass)
            .map_err(|e| AppError::OutputFile(format!("failed to serialize report: {}", e)))?,
    };

    // 5. Write to file or stdout
    if let Some(output_path) = output {
        fs::write(output_path, &result).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        info!(
            citations = pass.citations().len(),
            output = %output_path.display(),
            "wrote processed nodes"
        );
        eprintln!(
            "processed {} citation(s), wrote {}",
            pass.citations().len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", result)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// Print one line per link: index, citation flag, destination and label.
fn detect_command(input: &Path) -> Result<(), AppError> {
    let nodes = read_nodes(input)?;
    let pass = detect_and_strip(&nodes);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for link in pass.links() {
        let label = nodes[link.index].plain_text();
        writeln!(
            handle,
            "{}\t{}\t{}\t{}",
            link.index,
            if link.is_citation { "citation" } else { "link" },
            link.destination.unwrap_or("-"),
            label
        )
        .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// List available builtin citation styles.
fn styles_command() {
    for name in builtin_style_names() {
        println!("{}", name);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_nodes(input: &Path) -> Result<Vec<InlineNode>, AppError> {
    let nodes = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        parse_nodes(&buf).map_err(|e| map_nodes_error(input, e))?
    } else {
        load_nodes(input).map_err(|e| map_nodes_error(input, e))?
    };

    info!(input = %input.display(), nodes = nodes.len(), "read inline nodes");
    Ok(nodes)
}

/// Maps a NodesError to an AppError using type-safe matching.
fn map_nodes_error(input: &Path, e: NodesError) -> AppError {
    match e {
        NodesError::IoError(_) => AppError::InputFile(format!("'{}': {}", input.display(), e)),
        _ => AppError::InvalidNodes(format!("'{}': {}", input.display(), e)),
    }
}

fn resolve_style(style: &str) -> Result<CitationStyle, AppError> {
    if let Some(builtin) = builtin_style(style) {
        return Ok(builtin);
    }

    let style_path = PathBuf::from(style);
    load_style(&style_path).map_err(|e| {
        if style_path.exists() {
            AppError::Style(format!("invalid citation style '{}': {}", style, e))
        } else {
            AppError::Style(format!(
                "'{}' is not a builtin style name and no file with this path exists",
                style
            ))
        }
    })
}
