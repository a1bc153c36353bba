use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use log::{LevelFilter, warn};
use lyric::interpreter::{evaluator::core::Config, session::Interpreter, value::host::render};

/// lyric runs programs written as song lyrics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lyric to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Aborts any loop that runs more than this many iterations.
    #[arg(short, long)]
    max_loop_iterations: Option<usize>,

    /// Logs more; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let mut config = Config::new();
    if let Some(limit) = args.max_loop_iterations {
        config = config.with_max_loop_iterations(limit);
    }

    let mut stdin = io::stdin().lock().lines();
    let mut interpreter =
        Interpreter::new(script).with_config(config)
                                .with_input(move || stdin.next().and_then(Result::ok).map(Into::into))
                                .with_output(|value| {
                                    let mut stdout = io::stdout().lock();
                                    if let Err(e) = writeln!(stdout, "{}", render(value.as_ref())) {
                                        warn!("failed to write output: {e}");
                                    }
                                });

    if let Err(e) = interpreter.run() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
