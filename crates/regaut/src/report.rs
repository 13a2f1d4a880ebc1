//! Human-readable recognition reports and persistence of accepted paths.

use crate::automaton::{Recognition, Rejection, StateId};
use crate::error::Result;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn plain_name(state: StateId) -> String {
    state.to_string()
}

/// The verdict of one recognition, ready to be printed.
///
/// ```text
/// 'aa' é reconhecida
/// [ caminho 0->1->1]
/// ```
pub struct Report<'a, F = fn(StateId) -> String> {
    word: &'a str,
    recognition: &'a Recognition,
    state_name: F,
}

impl<'a> Report<'a> {
    /// A report naming states by their ids.
    pub fn new(word: &'a str, recognition: &'a Recognition) -> Self {
        Self::with_names(word, recognition, plain_name)
    }
}

impl<'a, F: Fn(StateId) -> String> Report<'a, F> {
    /// A report naming states with `state_name`.
    pub fn with_names(word: &'a str, recognition: &'a Recognition, state_name: F) -> Self {
        Self {
            word,
            recognition,
            state_name,
        }
    }

    /// The visited states joined with `->`.
    pub fn path(&self) -> String {
        self.recognition
            .path
            .iter()
            .map(|&state| (self.state_name)(state))
            .collect::<Vec<_>>()
            .join("->")
    }

    /// Write the word and its path.
    pub fn write_path<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "Word: {}\nPath: {}", self.word, self.path())
    }

    /// Persist the word and its path to `file`, but only for an accepted
    /// word. Returns whether anything was written.
    pub fn save_path(&self, file: impl AsRef<Path>) -> Result<bool> {
        if !self.recognition.accepted() {
            return Ok(false);
        }

        let file = file.as_ref();
        let mut writer = BufWriter::new(File::create(file)?);
        self.write_path(&mut writer)?;
        writer.flush()?;
        debug!("saved path of {:?} to {}", self.word, file.display());
        Ok(true)
    }
}

impl<F: Fn(StateId) -> String> fmt::Display for Report<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = self.word;
        match self.recognition.rejection {
            None => write!(f, "'{word}' é reconhecida\n[ caminho {}]", self.path()),
            Some(Rejection::UnknownSymbol(symbol)) => write!(
                f,
                "'{word}' não é reconhecida\n[símbolo '{symbol}' não pertence ao alfabeto]"
            ),
            Some(Rejection::MissingTransition { state, symbol }) => write!(
                f,
                "'{word}' não é reconhecida\n[símbolo '{symbol}' não possui transição a partir do estado '{}']",
                (self.state_name)(state)
            ),
            Some(Rejection::NotFinal(state)) => write!(
                f,
                "'{word}' não é reconhecida\n[caminho {}, {} não é final]",
                self.path(),
                (self.state_name)(state)
            ),
        }
    }
}
