use std::io::{self, BufRead, Write};

use crate::error::Maybe;

/// The terminal the user sits at: questions in, status lines out.
pub trait Console {
    /// Asks a single question. `None` means input was closed before an answer.
    fn ask(&self, prompt: &str) -> Maybe<Option<String>>;

    fn tell(&self, line: &str);
}

pub struct Stderr;

impl Console for Stderr {
    fn ask(&self, prompt: &str) -> Maybe<Option<String>> {
        eprint!("{prompt} ");
        io::stderr().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            eprintln!();
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    fn tell(&self, line: &str) {
        eprintln!("{line}");
    }
}
