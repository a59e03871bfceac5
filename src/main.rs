use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tape_bf::cli_util::print_error;
use tape_bf::config::{Config, Overrides, Source};
use tape_bf::{Interpreter, Streams};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Run a Brainfuck program read from FILEs, from --execute, or from stdin.
#[derive(Parser, Debug)]
#[command(name = "bf", version)]
struct Cli {
    /// Print a step-by-step table of operations instead of executing (fallback BF_DEBUG=1)
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Text shown on stderr before each `,` read; empty disables it (fallback BF_PROMPT)
    #[arg(long = "prompt", value_name = "TEXT")]
    prompt: Option<String>,

    /// Brainfuck code to run; repeat to concatenate parts
    #[arg(
        short = 'e',
        long = "execute",
        value_name = "CODE",
        allow_hyphen_values = true,
        conflicts_with = "files"
    )]
    execute: Vec<String>,

    /// Program files, concatenated in order. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Config {
        let source = if !self.execute.is_empty() {
            Source::Inline(self.execute)
        } else if !self.files.is_empty() {
            Source::Files(self.files)
        } else {
            Source::Stdin
        };
        let flags = Overrides {
            prompt: self.prompt,
            debug: self.debug,
        };
        Config::resolve(source, flags)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn run(program: &str, config: Config) -> i32 {
    let text = match config.source.load() {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{program}: failed to read program: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let mut bf = Interpreter::new(&text);
    debug!(source = ?config.source, debug = config.debug, "loaded program");

    let result = if config.debug {
        let mut stdout = io::stdout().lock();
        let result = bf.run_debug(&mut stdout);
        let _ = stdout.flush();
        result
    } else {
        bf.run(&mut Streams::stdio(config.prompt))
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            let _ = io::stdout().flush();
            print_error(Some(program), &bf.program_text(), &err);
            1
        }
    }
}

fn main() {
    init_tracing();

    let program = std::env::args().next().unwrap_or_else(|| String::from("bf"));
    let cli = Cli::parse();
    let code = run(&program, cli.into_config());
    std::process::exit(code);
}
