//! Interactive shell
//!
//! Keeps one data store alive across commands, so records created in the
//! shell stay visible until it exits.

use std::io::{BufRead, Write};

use clap::Parser;
use tracing::debug;
use visitor_core::{Notifier, Result, SessionStorage};

use crate::cli::ShellLine;
use crate::console::Console;

const PROMPT: &str = "visitor> ";

/// Read commands from `input` until end of input or `exit`
pub fn run<S, N, R, W>(console: &mut Console<S, N>, mut input: R, mut output: W) -> Result<()>
where
    S: SessionStorage,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }

        match ShellLine::try_parse_from(&words) {
            Ok(parsed) => match console.run(parsed.command) {
                Ok(outcome) => writeln!(output, "{}", outcome)?,
                Err(e) => debug!(error = %e, "Shell command failed"),
            },
            Err(e) => write!(output, "{}", e)?,
        }
    }
    Ok(())
}

/// Split a line into words, honouring single and double quotes
pub fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
