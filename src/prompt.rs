//! Consent gate for system-modifying installs.
//!
//! Two implementations, selected at construction: an interactive prompter
//! that loops until it reads a recognizable yes/no answer, and an auto-grant
//! prompter driven by `NO_POPUP` for non-interactive runs.

use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consent {
    Granted,
    Denied,
}

pub trait Prompter {
    fn confirm(&mut self, prompt: &str) -> Result<Consent>;
}

/// Select the prompter from the environment: any non-empty `NO_POPUP`
/// auto-grants every gate without reading input.
pub fn from_env() -> Box<dyn Prompter> {
    match env::var_os("NO_POPUP") {
        Some(value) if !value.is_empty() => Box::new(AutoGrantPrompter),
        _ => Box::new(InteractivePrompter::stdin()),
    }
}

pub struct AutoGrantPrompter;

impl Prompter for AutoGrantPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<Consent> {
        tracing::info!("consent prompt skipped (NO_POPUP set): {prompt}");
        Ok(Consent::Granted)
    }
}

pub struct InteractivePrompter<R> {
    input: R,
}

impl InteractivePrompter<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> InteractivePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for InteractivePrompter<R> {
    fn confirm(&mut self, prompt: &str) -> Result<Consent> {
        loop {
            eprint!("{prompt} [y/n]: ");
            io::stderr().flush().context("flush prompt")?;
            let mut answer = String::new();
            let read = self
                .input
                .read_line(&mut answer)
                .context("read consent answer")?;
            if read == 0 {
                // Closed input cannot answer; treat as denial rather than spin.
                return Ok(Consent::Denied);
            }
            match parse_answer(&answer) {
                Some(consent) => return Ok(consent),
                None => tracing::warn!(
                    "unrecognized answer {:?}, expected yes or no",
                    answer.trim()
                ),
            }
        }
    }
}

fn parse_answer(raw: &str) -> Option<Consent> {
    let normalized = raw.trim().to_lowercase();
    if normalized.starts_with('y') {
        Some(Consent::Granted)
    } else if normalized.starts_with('n') {
        Some(Consent::Denied)
    } else {
        None
    }
}
