use std::{
    fs,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use subc::{
    check,
    config::{DEFAULT_MAX_CALL_DEPTH, InterpreterConfig},
    error::Error,
    parse, run, tokenize,
};
use tracing::{debug, level_filters::LevelFilter};

/// subc runs programs written in SubC, a small C-flavored teaching language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The SubC source file to run.
    file: PathBuf,

    /// Maximum number of nested function calls before the run fails with a
    /// stack overflow error.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Stack size in megabytes for the thread that evaluates the program.
    /// Derived from the call depth limit when omitted.
    #[arg(long, value_name = "MB")]
    stack_size: Option<usize>,

    /// Stop after semantic checking instead of running the program.
    #[arg(long)]
    check: bool,

    /// Print the token stream and exit.
    #[arg(long)]
    dump_tokens: bool,

    /// Pretty-print the parsed program and exit.
    #[arg(long)]
    dump_ast: bool,

    /// Print the cross-reference table after checking.
    #[arg(long)]
    xref: bool,

    /// Raise log verbosity; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Reports a pipeline failure on stderr and turns it into the exit status.
fn fail(error: impl Into<Error>) -> ExitCode {
    let error = error.into();
    debug!(stage = error.stage(), "run failed");
    eprintln!("{error}");
    ExitCode::from(error.exit_code())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_target(false)
                             .with_max_level(level_for(args.verbose))
                             .init();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read the input file '{}': {error}", args.file.display());
            return ExitCode::from(1);
        },
    };

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => return fail(error),
    };
    if args.dump_tokens {
        for (token, position) in &tokens {
            println!("{}:{}\t{token}", position.line, position.column);
        }
        return ExitCode::SUCCESS;
    }

    let program = match parse(&tokens) {
        Ok(program) => program,
        Err(error) => return fail(error),
    };
    if args.dump_ast {
        print!("{program}");
        return ExitCode::SUCCESS;
    }

    let checked = match check(program) {
        Ok(checked) => checked,
        Err(errors) => return fail(errors),
    };
    if args.xref {
        print!("{}", checked.cross_reference());
    }
    if args.check {
        return ExitCode::SUCCESS;
    }

    let mut config = InterpreterConfig::default().with_max_call_depth(args.max_depth);
    if let Some(megabytes) = args.stack_size {
        config = config.with_stack_size(megabytes.saturating_mul(1024 * 1024));
    }

    let mut out = BufWriter::new(io::stdout());
    match run(&checked, &mut out, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => fail(error),
    }
}
