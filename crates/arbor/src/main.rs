mod session;

use std::process::ExitCode;

use arbor_math::Binding;
use arbor_parse::{Config, DEFAULT_MAX_DEPTH};
use arbor_tokenizer::EmptyInput;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use session::Session;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Evaluate arithmetic expressions")]
struct Options {
    /// Deepest expression nesting accepted.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
    /// Treat an empty expression as an error.
    #[arg(long, global = true)]
    reject_empty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value of an expression.
    Eval {
        expr: String,
        /// Variable binding such as `x=1.5`.
        #[arg(short = 'v', long = "var")]
        vars: Vec<Binding>,
    },
    /// Print the tree an expression parses into.
    Tree { expr: String },
    /// Evaluate every non-blank line of a file.
    Run {
        path: Utf8PathBuf,
        #[arg(short = 'v', long = "var")]
        vars: Vec<Binding>,
    },
    /// Evaluate lines read from stdin.
    Repl {
        #[arg(short = 'v', long = "var")]
        vars: Vec<Binding>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = Options::parse();
    let config = Config {
        empty_input: if options.reject_empty { EmptyInput::Reject } else { EmptyInput::Allow },
        max_depth: options.max_depth,
    };
    let engine = arbor_math::engine(config)?;

    let ok = match options.command {
        Command::Eval { expr, vars } => Session::new(engine, vars).eval("<expr>", &expr),
        Command::Tree { expr } => Session::new(engine, Vec::new()).tree("<expr>", &expr),
        Command::Run { path, vars } => Session::new(engine, vars).run(&path)?,
        Command::Repl { vars } => {
            Session::new(engine, vars).repl()?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
