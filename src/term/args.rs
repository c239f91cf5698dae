use super::Console;
use clap::Parser;
use std::path::PathBuf;

/// Command line of `colti`. Help and version are handled by hand so that
/// `--help <ARG>` can describe a single argument.
#[derive(Parser, Debug, Default)]
#[command(name = "colti", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Colt source or chunk file
    pub path: Option<PathBuf>,

    #[arg(short, long, value_name = "ARG", num_args = 0..=1, allow_hyphen_values = true)]
    pub help: Option<Option<String>>,

    #[arg(short, long)]
    pub version: bool,

    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    pub disassemble: Option<Option<PathBuf>>,

    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[arg(short, long = "byte-out", value_name = "PATH")]
    pub byte_out: Option<PathBuf>,

    #[arg(long)]
    pub no_color: bool,

    /// Operand stack slots, at least one
    #[arg(long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub stack: Option<usize>,
}

/// What the command line asks for, after the combination rules.
#[derive(Debug, PartialEq)]
pub enum Action {
    Repl,
    Run(PathBuf),
    Disassemble(PathBuf),
    Compile {
        input: PathBuf,
        out: PathBuf,
        byte_out: Option<PathBuf>,
    },
    Help(Option<Arg>),
    Version,
}

/// Why the command line was rejected. Always exit code 3.
#[derive(Debug, PartialEq)]
pub enum Misuse {
    InvalidCombination(String),
    /// `-d` without a path prints its help.
    MissingPath(Arg),
    NoInputFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Help,
    Version,
    Disassemble,
    Out,
    ByteOut,
}

impl Arg {
    pub const ALL: [Arg; 5] = [Arg::Help, Arg::Version, Arg::Disassemble, Arg::Out, Arg::ByteOut];

    pub fn from_flag(s: &str) -> Option<Arg> {
        match s {
            "-h" | "--help" => Some(Arg::Help),
            "-v" | "--version" => Some(Arg::Version),
            "-d" | "--disassemble" => Some(Arg::Disassemble),
            "-o" | "--out" => Some(Arg::Out),
            "-b" | "--byte-out" => Some(Arg::ByteOut),
            _ => None,
        }
    }

    fn flags(self) -> (&'static str, &'static str) {
        match self {
            Arg::Help => ("-h", "--help"),
            Arg::Version => ("-v", "--version"),
            Arg::Disassemble => ("-d", "--disassemble"),
            Arg::Out => ("-o", "--out"),
            Arg::ByteOut => ("-b", "--byte-out"),
        }
    }

    fn purpose(self) -> &'static str {
        match self {
            Arg::Help => "Prints the purpose and use of an argument.",
            Arg::Version => "Prints the version of the compiler.",
            Arg::Disassemble => {
                "Disassembles a serialized chunk of code (compiled byte-code), which usually ends with '.ctc'."
            }
            Arg::Out => "Specifies the executable output path.",
            Arg::ByteOut => "Specifies the byte-code output path.",
        }
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            Arg::Help => Some("<ARG>"),
            Arg::Version => None,
            Arg::Disassemble | Arg::Out | Arg::ByteOut => Some("<PATH>"),
        }
    }

    pub fn describe(self, console: &Console) -> String {
        let (short, long) = self.flags();
        let mut s = format!(
            "{}: {}\nUse: {}",
            console.argument(&format!("{}, {}", short, long)),
            self.purpose(),
            console.argument(long)
        );
        if let Some(placeholder) = self.placeholder() {
            s.push(' ');
            s.push_str(&console.placeholder(placeholder));
        }
        s
    }
}

impl Args {
    fn exclusive_count(&self) -> usize {
        let mut n = 0;
        if self.path.is_some() {
            n += 1;
        }
        if self.help.is_some() {
            n += 1;
        }
        if self.version {
            n += 1;
        }
        if self.disassemble.is_some() {
            n += 1;
        }
        if self.out.is_some() {
            n += 1;
        }
        if self.byte_out.is_some() {
            n += 1;
        }
        n
    }

    pub fn action(&self) -> Result<Action, Misuse> {
        let alone = self.exclusive_count() == 1;
        if let Some(topic) = &self.help {
            if !alone {
                return Err(Misuse::InvalidCombination("--help".into()));
            }
            return match topic {
                None => Ok(Action::Help(None)),
                Some(flag) => match Arg::from_flag(flag) {
                    Some(arg) => Ok(Action::Help(Some(arg))),
                    None => Err(Misuse::InvalidCombination(format!("--help: {}", flag))),
                },
            };
        }
        if self.version {
            if !alone {
                return Err(Misuse::InvalidCombination("--version".into()));
            }
            return Ok(Action::Version);
        }
        if let Some(path) = &self.disassemble {
            if !alone {
                return Err(Misuse::InvalidCombination("--disassemble".into()));
            }
            return match path {
                Some(path) => Ok(Action::Disassemble(path.clone())),
                None => Err(Misuse::MissingPath(Arg::Disassemble)),
            };
        }
        if self.out.is_some() || self.byte_out.is_some() {
            return match &self.path {
                Some(input) => Ok(Action::Compile {
                    input: input.clone(),
                    out: self.out.clone().unwrap_or_else(|| PathBuf::from("a.out")),
                    byte_out: self.byte_out.clone(),
                }),
                None => Err(Misuse::NoInputFile),
            };
        }
        Ok(match &self.path {
            Some(path) => Action::Run(path.clone()),
            None => Action::Repl,
        })
    }
}
