//! POSIX-style shell word splitting
//!
//! Terminals wrap dragged-in paths in quotes or escape their spaces
//! (`'/Users/me/My Logo.png'`, `/Users/me/My\ Logo.png`). Splitting the input the
//! way a shell would recovers the real path.

use thiserror::Error;

/// Malformed shell quoting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellSplitError {
    /// A `'` or `"` was opened and never closed
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
    /// The input ends with an unescaped backslash
    #[error("trailing backslash escape")]
    TrailingEscape,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Word,
    Single,
    Double,
}

/// Split `input` into words following POSIX shell quoting rules.
pub fn split(input: &str) -> Result<Vec<String>, ShellSplitError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut state = State::Between;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Between | State::Word => match c {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut word));
                        state = State::Between;
                    }
                }
                '\\' => match chars.next() {
                    Some(escaped) => {
                        word.push(escaped);
                        state = State::Word;
                    }
                    None => return Err(ShellSplitError::TrailingEscape),
                },
                '\'' => state = State::Single,
                '"' => state = State::Double,
                other => {
                    word.push(other);
                    state = State::Word;
                }
            },
            State::Single => match c {
                '\'' => state = State::Word,
                other => word.push(other),
            },
            State::Double => match c {
                '"' => state = State::Word,
                '\\' => match chars.peek().copied() {
                    Some(next @ ('"' | '\\')) => {
                        chars.next();
                        word.push(next);
                    }
                    _ => word.push('\\'),
                },
                other => word.push(other),
            },
        }
    }

    match state {
        State::Single => Err(ShellSplitError::UnterminatedQuote('\'')),
        State::Double => Err(ShellSplitError::UnterminatedQuote('"')),
        State::Word => {
            words.push(word);
            Ok(words)
        }
        State::Between => Ok(words),
    }
}

/// Split `input` into words, falling back to the trimmed input as a single word when
/// the quoting is malformed.
pub fn unquote(input: &str) -> Vec<String> {
    match split(input) {
        Ok(words) => words,
        Err(err) => {
            tracing::debug!(%err, "Shell split failed, using raw input");
            let trimmed = input.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
    }
}
