use std::{
    fs,
    io::{self, BufRead, Write},
    process,
    rc::Rc,
    thread,
};

use clap::Parser;
use scenev::{STACK_SIZE, global_context, interpreter::scope::Context, run};

const PROMPT: &str = "scenev> ";

/// scenev is a small expression language with variables, loops and
/// first-class functions.
///
/// With no arguments an interactive session is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as the path of a file to run line by line.
    #[arg(short, long, requires = "contents")]
    file: bool,

    /// Name shown in error reports. Defaults to `<stdin>`, or the file path.
    #[arg(long)]
    filename: Option<String>,

    /// Source to run, or a file path with `--file`.
    contents: Option<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let spawned = thread::Builder::new().name("scenev".to_string())
                                        .stack_size(STACK_SIZE)
                                        .spawn(move || session(args));
    match spawned {
        Ok(handle) => {
            if handle.join().is_err() {
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Failed to start the interpreter thread: {e}");
            process::exit(1);
        },
    }
}

/// Runs the REPL, a file or a single source string, as `args` asks.
fn session(args: Args) {
    let context = global_context();

    match (args.contents, args.file) {
        (None, _) => {
            let filename = args.filename.unwrap_or_else(|| "<stdin>".to_string());
            if let Err(e) = repl(&filename, &context) {
                eprintln!("I/O error: {e}");
                process::exit(1);
            }
        },
        (Some(path), true) => {
            let script = fs::read_to_string(&path).unwrap_or_else(|_| {
                             eprintln!("Failed to read the input file '{path}'. Perhaps this \
                                        file does not exist?");
                             process::exit(1);
                         });
            let filename = args.filename.unwrap_or(path);
            for line in script.lines().filter(|l| !l.trim().is_empty()) {
                if !run_line(&filename, line, &context) {
                    process::exit(1);
                }
            }
        },
        (Some(source), false) => {
            let filename = args.filename.unwrap_or_else(|| "<stdin>".to_string());
            if !run_line(&filename, &source, &context) {
                process::exit(1);
            }
        },
    }
}

/// Runs one line and prints its value or error. Returns `false` on error.
fn run_line(filename: &str, line: &str, context: &Rc<Context>) -> bool {
    match run(filename, line, context) {
        Ok(Some(value)) => {
            println!("{value}");
            true
        },
        Ok(None) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        },
    }
}

/// Reads lines from stdin until EOF, running each in `context`.
fn repl(filename: &str, context: &Rc<Context>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        run_line(filename, input, context);
    }
}
