use super::{scan, Console};
use linefeed::interface::Interface;
use linefeed::reader::ReadResult;

/// Scans each line typed at the `> ` prompt until end of input.
pub fn main(console: &Console) -> std::io::Result<()> {
    let interface = Interface::new("colti")?;
    interface.set_prompt("> ")?;
    loop {
        let input = match interface.read_line()? {
            ReadResult::Input(input) => input,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if input.trim().is_empty() {
            continue;
        }
        let (dump, _) = scan(&input, console);
        interface.write_fmt(format_args!("{}", dump))?;
        interface.add_history_unique(input);
    }
    Ok(())
}
