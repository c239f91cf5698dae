use colti::error;
use colti::lang::{Error, Scanner, Token};
use colti::mach::{disassemble, Chunk, StackVM, CHUNK_MAGIC};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod config;
mod linefeed;

pub use args::{Action, Arg, Args, Misuse};
pub use config::{Config, Console};

type Result<T> = std::result::Result<T, Error>;

const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 3;

/// Returns the process exit code.
pub fn main() -> i32 {
    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return EXIT_USAGE;
        }
    };
    let config = Config::from_env(&args);
    init_logging(&config);
    execute(&args, &config, &mut std::io::stdout())
}

/// Everything after parsing. Output goes to `out`; the exit code is
/// 0 on success, 1 on a failed action and 3 on misuse.
fn execute<W: Write>(args: &Args, config: &Config, out: &mut W) -> i32 {
    let console = Console::new(config);
    let action = match args.action() {
        Ok(action) => action,
        Err(misuse) => {
            let _ = writeln!(out, "{}", describe_misuse(&misuse, &console));
            return EXIT_USAGE;
        }
    };
    debug!(?action, ?config, "start");
    match dispatch(action, config, &console, out) {
        Ok(code) => code,
        Err(error) => {
            let _ = writeln!(out, "{}", console.error(&error.to_string()));
            EXIT_ERROR
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!(%error, "Ctrl-C handler not installed");
    }
    interrupted
}

fn describe_misuse(misuse: &Misuse, console: &Console) -> String {
    match misuse {
        Misuse::InvalidCombination(args) => {
            console.error(&format!("Invalid argument combination for '{}'.", args))
        }
        Misuse::MissingPath(arg) => arg.describe(console),
        Misuse::NoInputFile => console.error("No input file!"),
    }
}

fn dispatch<W: Write>(action: Action, config: &Config, console: &Console, out: &mut W) -> Result<i32> {
    match action {
        Action::Help(None) => {
            writeln!(
                out,
                "Usage: {} {}",
                console.argument("colti"),
                console.placeholder("[PATH] [ARGS]")
            )?;
            for arg in Arg::ALL.iter() {
                writeln!(out, "{}", arg.describe(console))?;
            }
        }
        Action::Help(Some(arg)) => writeln!(out, "{}", arg.describe(console))?,
        Action::Version => writeln!(
            out,
            "{}",
            console.banner(&format!(
                "COLTI v{} on {}",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS
            ))
        )?,
        Action::Disassemble(path) => {
            let chunk = Chunk::deserialize(&path)?;
            write!(out, "{}", disassemble(&chunk, &path.display().to_string())?)?;
        }
        Action::Compile {
            input,
            out: exe_out,
            byte_out,
        } => {
            std::fs::metadata(&input)?;
            debug!(input = %input.display(), out = %exe_out.display(), ?byte_out, "compile requested");
            return Err(error!(CompilerUnavailable; format!("cannot build {}", input.display())));
        }
        Action::Run(path) => return run_file(&path, config, console, out),
        Action::Repl => linefeed::main(console)?,
    }
    Ok(0)
}

fn run_file<W: Write>(path: &Path, config: &Config, console: &Console, out: &mut W) -> Result<i32> {
    let bytes = std::fs::read(path)?;
    if bytes.starts_with(&CHUNK_MAGIC) {
        let chunk = Chunk::from_file_bytes(&bytes)?;
        let mut vm = StackVM::with_capacity(config.stack_capacity);
        vm.set_interrupt(interrupt_flag());
        let result = vm.run(&chunk, out);
        out.flush()?;
        result?;
        return Ok(0);
    }
    let source = String::from_utf8_lossy(&bytes);
    let (dump, errors) = scan(&source, console);
    write!(out, "{}", dump)?;
    Ok(if errors > 0 { EXIT_ERROR } else { 0 })
}

/// Token dump of `source` with a diagnostic for every scan error.
/// Returns the text and the number of errors.
pub fn scan(source: &str, console: &Console) -> (String, usize) {
    let mut out = String::new();
    let mut errors = 0;
    let mut scanner = Scanner::new(source);
    loop {
        let token = scanner.next_token();
        match token {
            Token::Eof => break,
            Token::Error => {
                errors += 1;
                if let Some(error) = scanner.error() {
                    out.push_str(&diagnostic(&scanner, error, console));
                }
            }
            _ => {
                out.push_str(&format!("{:>4} {}", scanner.line(), token.name()));
                match token {
                    Token::Identifier => out.push_str(&format!(" '{}'", scanner.identifier())),
                    Token::String => out.push_str(&format!(" {:?}", scanner.string())),
                    Token::Integer => out.push_str(&format!(" {}", scanner.integer())),
                    Token::Double => out.push_str(&format!(" {:?}", scanner.double())),
                    _ => {}
                }
                out.push('\n');
            }
        }
    }
    (out, errors)
}

fn diagnostic(scanner: &Scanner<'_>, error: &Error, console: &Console) -> String {
    let mut s = format!("{}\n", console.error(&error.to_string()));
    if let Some(line) = error.line_number().and_then(|n| scanner.source_line(n)) {
        let column = error.column();
        s.push_str(&console.underline(line, &[column.clone()]));
        s.push('\n');
        if !console.is_color() {
            s.push_str(&console.caret(line, &column));
            s.push('\n');
        }
    }
    s
}
