//! plainpdf CLI - plain text to PDF tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use plainpdf::{
    inspect, ConverterRegistry, Metadata, Synthesizer, TextEncoding, DEFAULT_COLUMN_WIDTH,
    DEFAULT_LINES_PER_PAGE,
};

#[derive(Parser)]
#[command(name = "plainpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn plain text into a paginated PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PDF from each input file
    Build {
        /// Input files (.txt, .md, .log, .json, ...)
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (several inputs)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Characters per line
        #[arg(long, default_value_t = DEFAULT_COLUMN_WIDTH, env = "PLAINPDF_WIDTH")]
        width: usize,

        /// Lines per page
        #[arg(long, default_value_t = DEFAULT_LINES_PER_PAGE, env = "PLAINPDF_LINES")]
        lines: usize,

        /// Font size in points
        #[arg(long, default_value = "8")]
        font_size: u32,

        /// Flate-compress content streams
        #[arg(short, long)]
        compress: bool,

        /// Text encoding inside content streams
        #[arg(long, value_enum, default_value = "utf8")]
        encoding: EncodingArg,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long, env = "PLAINPDF_AUTHOR")]
        author: Option<String>,

        /// Normalize text to Unicode NFC before layout
        #[arg(long)]
        nfc: bool,
    },

    /// Verify a PDF and show its structure
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EncodingArg {
    /// Raw UTF-8 bytes
    Utf8,
    /// Windows-1252 with /WinAnsiEncoding
    WinAnsi,
}

impl From<EncodingArg> for TextEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => TextEncoding::Utf8,
            EncodingArg::WinAnsi => TextEncoding::WinAnsi,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            inputs,
            output,
            width,
            lines,
            font_size,
            compress,
            encoding,
            title,
            author,
            nfc,
        }) => {
            let mut synthesizer = Synthesizer::new()
                .with_column_width(width)
                .with_lines_per_page(lines)
                .with_font_size(font_size)
                .with_encoding(encoding.into())
                .with_metadata(Metadata {
                    title,
                    author,
                    creator: Some(format!("plainpdf {}", env!("CARGO_PKG_VERSION"))),
                    ..Default::default()
                });
            if compress {
                synthesizer = synthesizer.compressed();
            }
            if nfc {
                synthesizer = synthesizer.normalized();
            }
            cmd_build(&inputs, output.as_deref(), &synthesizer)
        }
        Some(Commands::Inspect { input, json }) => cmd_inspect(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: plainpdf build <FILES>... [-o OUTPUT]".yellow());
            println!("       plainpdf --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Where the PDF for `input` goes.
fn output_path(input: &Path, output: Option<&Path>, several: bool) -> PathBuf {
    let file_name = Path::new(input.file_stem().unwrap_or_default()).with_extension("pdf");
    match output {
        Some(dir) if several => dir.join(file_name),
        Some(path) => path.to_path_buf(),
        None => input.with_file_name(file_name),
    }
}

fn cmd_build(
    inputs: &[PathBuf],
    output: Option<&Path>,
    synthesizer: &Synthesizer,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ConverterRegistry::with_defaults();
    let several = inputs.len() > 1;

    if several {
        if let Some(dir) = output {
            fs::create_dir_all(dir)?;
        }
    }

    let pb = if several {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        pb.set_message(input.display().to_string());

        let text = registry.convert(input)?;
        let target = output_path(input, output, several);
        log::debug!("{} -> {}", input.display(), target.display());

        synthesizer.write_file(&target, &text)?;
        written.push(target);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for target in &written {
        println!("{} {}", "Saved to".green(), target.display());
    }

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let report = inspect(&data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), report.version);
    println!("{}: {} bytes", "Size".bold(), report.byte_len);
    println!("{}: {}", "Objects".bold(), report.object_count);
    println!("{}: {}", "Pages".bold(), report.page_count);
    println!("{}: {}", "Xref offset".bold(), report.xref_offset);
    println!(
        "{}: {}",
        "Compressed".bold(),
        if report.compressed { "Yes" } else { "No" }
    );
    if let Some(info) = report.info {
        println!("{}: object {}", "Info".bold(), info);
    }

    println!();
    println!("{}", "Cross-reference table verified".green());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "plainpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Plain text to PDF tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/plainpdf".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path(Path::new("notes/todo.txt"), None, false);
        assert_eq!(path, PathBuf::from("notes/todo.pdf"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        let path = output_path(Path::new("a.md"), Some(Path::new("out.pdf")), false);
        assert_eq!(path, PathBuf::from("out.pdf"));
    }

    #[test]
    fn test_output_path_directory_for_several() {
        let path = output_path(Path::new("docs/a.md"), Some(Path::new("out")), true);
        assert_eq!(path, PathBuf::from("out/a.pdf"));
    }

    #[test]
    fn test_build_writes_each_input() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one.txt");
        let second = dir.path().join("two.json");
        fs::write(&first, "first file").unwrap();
        fs::write(&second, r#"{"key": "value"}"#).unwrap();
        let out = dir.path().join("pdfs");

        cmd_build(&[first, second], Some(&out), &Synthesizer::new()).unwrap();

        for name in ["one.pdf", "two.pdf"] {
            let data = fs::read(out.join(name)).unwrap();
            assert_eq!(inspect(&data).unwrap().page_count, 1);
        }
    }
}
