use super::Args;
use ansi_term::{Colour, Style};
use colti::mach::STACK_CAPACITY;

const LOG_ENV: &str = "COLTI_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings gathered from the command line and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub color: bool,
    pub stack_capacity: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            color: true,
            stack_capacity: STACK_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    pub fn from_env(args: &Args) -> Config {
        Config::new(
            args,
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var(LOG_ENV).ok(),
        )
    }

    fn new(args: &Args, no_color_env: bool, log_filter: Option<String>) -> Config {
        let default = Config::default();
        Config {
            color: !(args.no_color || no_color_env),
            stack_capacity: args.stack.unwrap_or(default.stack_capacity),
            log_filter: log_filter.unwrap_or(default.log_filter),
        }
    }
}

/// Console decoration. Every method returns plain text when color is off.
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(config: &Config) -> Console {
        Console {
            color: config.color,
        }
    }

    pub fn is_color(&self) -> bool {
        self.color
    }

    fn paint(&self, style: Style, s: &str) -> String {
        if self.color {
            style.paint(s).to_string()
        } else {
            s.to_string()
        }
    }

    pub fn error(&self, message: &str) -> String {
        format!("{} {}", self.paint(Colour::Red.bold(), "Error:"), message)
    }

    pub fn argument(&self, s: &str) -> String {
        self.paint(Colour::Cyan.normal(), s)
    }

    pub fn placeholder(&self, s: &str) -> String {
        self.paint(Colour::Purple.normal(), s)
    }

    pub fn banner(&self, s: &str) -> String {
        self.paint(Colour::Black.on(Colour::Fixed(13)), s)
    }

    /// Underlines the byte ranges of `line` named in `columns`.
    pub fn underline(&self, line: &str, columns: &[std::ops::Range<usize>]) -> String {
        if !self.color {
            return line.to_string();
        }
        let style = Style::new().underline();
        let prefix = style.prefix().to_string();
        let suffix = style.suffix().to_string();
        let mut under_on = false;
        let mut out = String::new();
        for (index, ch) in line.char_indices() {
            let do_under = columns.iter().any(|c| c.contains(&index));
            if under_on && !do_under {
                out.push_str(&suffix);
            } else if !under_on && do_under {
                out.push_str(&prefix);
            }
            under_on = do_under;
            out.push(ch);
        }
        if under_on {
            out.push_str(&suffix);
        }
        out
    }

    /// A caret line under the byte range `column` of `line`, for consoles
    /// without color. Pads by characters, not bytes.
    pub fn caret(&self, line: &str, column: &std::ops::Range<usize>) -> String {
        let before = line.get(..column.start).map_or(column.start, |s| s.chars().count());
        let width = line
            .get(column.clone())
            .map_or(column.end.saturating_sub(column.start), |s| s.chars().count())
            .max(1);
        format!("{}{}", " ".repeat(before), "^".repeat(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_wins() {
        let args = Args {
            no_color: true,
            ..Args::default()
        };
        let config = Config::new(&args, false, None);
        assert!(!config.color);
        assert_eq!(config.stack_capacity, 256);
        assert_eq!(config.log_filter, "warn");
        assert!(!Config::new(&Args::default(), true, None).color);
    }

    #[test]
    fn test_plain_console() {
        let console = Console::new(&Config {
            color: false,
            ..Config::default()
        });
        assert_eq!(console.error("gone"), "Error: gone");
        assert_eq!(console.underline("abc", &[1..2]), "abc");
        assert_eq!(console.caret("abcdef", &(2..4)), "  ^^");
    }

    #[test]
    fn test_caret_counts_chars() {
        let console = Console::new(&Config {
            color: false,
            ..Config::default()
        });
        assert_eq!(console.caret("é @", &(3..4)), "  ^");
        assert_eq!(console.caret("a \"ü", &(2..5)), "  ^^");
        assert_eq!(console.caret("ab", &(2..2)), "  ^");
    }

    #[test]
    fn test_underline() {
        let console = Console::new(&Config::default());
        let style = Style::new().underline();
        let expected = format!("a{}bc{}d", style.prefix(), style.suffix());
        assert_eq!(console.underline("abcd", &[1..3]), expected);
    }
}
