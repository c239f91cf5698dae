//! # Colti
//!
//! Command line front end: token dumps, chunk files and a scanning REPL.
//!

mod term;

fn main() {
    std::process::exit(term::main());
}
