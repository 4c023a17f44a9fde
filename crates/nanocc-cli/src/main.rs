use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nanocc_ast::diag::Diagnostic;
use nanocc_codegen::generate;
use nanocc_parse::{parse_str, tokenize};

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "nanocc")]
#[command(about = "nanocc: a tiny expression compiler targeting x86-64")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file to AT&T-style assembly
    Build {
        /// Path to the source file
        file: String,

        /// Write the assembly here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to the source file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Dump the token stream of a source file
    Lex {
        /// Path to the source file
        file: String,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { file, output } => cmd_build(&file, output.as_deref()),
        Commands::Parse { file, format } => cmd_parse(&file, format),
        Commands::Lex { file } => cmd_lex(&file),
    }
}

fn load_source(path: &str) -> Result<String> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;

    if src.len() > MAX_SOURCE_SIZE {
        eprintln!(
            "Error: source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
        std::process::exit(1);
    }

    // the language is a single line; drop the trailing newline editors add
    // so diagnostics render the bare source
    Ok(src.trim_end().to_string())
}

/// Print the two-line caret report and give up. The compiler proper never
/// terminates the process; that decision lives here.
fn report(err: Diagnostic) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}

fn cmd_build(file: &str, output: Option<&str>) -> Result<()> {
    let src = load_source(file)?;

    let program = match parse_str(&src) {
        Ok(program) => program,
        Err(err) => report(err),
    };
    let asm = match generate(&program) {
        Ok(asm) => asm,
        Err(err) => report(err),
    };

    match output {
        Some(path) => std::fs::write(path, &asm).with_context(|| format!("writing {path}"))?,
        None => print!("{asm}"),
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let src = load_source(file)?;

    let program = match parse_str(&src) {
        Ok(program) => program,
        Err(err) => report(err),
    };

    match format {
        Format::Pretty => println!("{program:#?}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}

fn cmd_lex(file: &str) -> Result<()> {
    let src = load_source(file)?;

    let toks = match tokenize(&src) {
        Ok(toks) => toks,
        Err(err) => report(err),
    };

    for tok in &toks {
        println!("{:?} @ {}..{}", tok.kind, tok.span.start, tok.span.end);
    }
    Ok(())
}
