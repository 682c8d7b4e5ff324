//! Interactive console session
//!
//! Each round clears the screen, asks for the text, an optional logo and an output
//! location, generates the code and asks whether to go again. Every failure is
//! reported and the loop carries on; only declining (or closing stdin) ends it.

use crate::error::{Error, Result};
use crate::output::{render_failure, render_report};
use crate::path;
use crate::pipeline::{GenerationRequest, QrPipeline};
use console::Term;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Answers to the "another one?" prompt that keep the session going
///
/// `s` is the Spanish "sí"; `y` matches the English `(y/n)` prompt.
const CONTINUE_ANSWERS: [&str; 2] = ["y", "s"];

/// Line-oriented console access used by the session
pub trait Prompter {
    /// Clear the visible screen
    fn clear(&mut self) -> io::Result<()>;

    /// Print one line
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Print `prompt` and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl Prompter for Term {
    fn clear(&mut self) -> io::Result<()> {
        self.clear_screen()
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.write_line(line)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.write_str(prompt)?;
        self.flush()?;

        if self.is_term() {
            return self.read_line().map(Some);
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Tally of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Codes written
    pub generated: usize,
    /// Rounds that ended in an error
    pub failed: usize,
}

/// The prompt loop
pub struct InteractiveSession<P: Prompter> {
    prompter: P,
    pipeline: QrPipeline,
}

impl<P: Prompter> InteractiveSession<P> {
    /// Create a session generating through `pipeline`
    pub fn new(prompter: P, pipeline: QrPipeline) -> Self {
        Self { prompter, pipeline }
    }

    /// Run rounds until the user declines to continue or input ends.
    pub fn run(mut self) -> SessionSummary {
        let mut summary = SessionSummary::default();

        loop {
            if let Err(err) = self.prompter.clear() {
                tracing::debug!("Could not clear screen: {err}");
            }

            match self.round() {
                Ok(Some(true)) => summary.generated += 1,
                Ok(Some(false)) => summary.failed += 1,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!("Console interaction failed: {err}");
                    self.show(&render_failure(&err).human);
                    break;
                }
            }

            let again = match self.ask("\nGenerate another QR? (y/n): ") {
                Ok(Some(answer)) => wants_another(&answer),
                Ok(None) => false,
                Err(err) => {
                    tracing::error!("Console interaction failed: {err}");
                    false
                }
            };
            if !again {
                break;
            }
        }

        self.say("\nThanks for using the QR generator. See you soon!\n");
        summary
    }

    /// One prompt-generate-report round.
    ///
    /// `Ok(None)` when input ended mid-round, otherwise whether a file was written.
    fn round(&mut self) -> Result<Option<bool>> {
        self.say("\n=== QR GENERATOR (interactive) ===\n");

        let Some(payload) = self.ask("Text or URL for the QR: ")? else {
            return Ok(None);
        };
        let payload = payload.trim().to_string();
        if payload.is_empty() {
            self.show(&render_failure(&Error::EmptyPayload).human);
            return Ok(Some(false));
        }

        self.say("\n(Drag the logo file here to use one, or press Enter to skip)");
        let Some(logo_raw) = self.ask("Logo (optional): ")? else {
            return Ok(None);
        };
        let logo_path = path::unquote(logo_raw.trim())
            .into_iter()
            .next()
            .map(PathBuf::from);

        self.say("\nEnter the output PNG path (e.g. /home/you/Desktop/qr.png)");
        self.say("You can also drag a folder (e.g. /home/you/Desktop/) and a file name is generated.");
        let Some(output_raw) = self.ask("Output: ")? else {
            return Ok(None);
        };
        let output_path = path::resolve(&output_raw);

        let outcome = GenerationRequest::new(payload, logo_path, output_path)
            .and_then(|request| self.pipeline.generate(request));

        match outcome {
            Ok(report) => {
                self.show(&render_report(&report).human);
                Ok(Some(true))
            }
            Err(err) => {
                tracing::warn!("Generation failed: {err}");
                self.show(&render_failure(&err).human);
                Ok(Some(false))
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompter
            .ask(prompt)
            .map_err(|e| Error::Prompt(e.to_string()))
    }

    fn say(&mut self, line: &str) {
        if let Err(err) = self.prompter.say(line) {
            tracing::debug!("Could not write to console: {err}");
        }
    }

    fn show(&mut self, lines: &[String]) {
        for line in lines {
            self.say(line);
        }
    }
}

fn wants_another(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    CONTINUE_ANSWERS.contains(&answer.as_str())
}
