//! API key selection.
//!
//! Video generation is gated on the user having picked a key. The host
//! capability is modelled as a [`KeySelector`]: a query for whether a key is
//! selected and a user-driven action that opens the selection flow.

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::genai::{KeySource, SharedKey};

/// Host-provided API key selection.
pub trait KeySelector {
    /// Whether a key has been selected.
    fn has_selected_key(&self) -> bool;

    /// Let the user select a key, writing any prompt to `prompt`. The
    /// outcome is read back through
    /// [`has_selected_key`](KeySelector::has_selected_key).
    fn open_select_key(&mut self, prompt: &mut dyn Write) -> io::Result<()>;
}

/// A source of input lines.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl LineSource for io::Stdin {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl LineSource for VecDeque<String> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.pop_front())
    }
}

/// Key selector that prompts for a key on `input`.
///
/// An entered key is kept in a [`SharedKey`]; until then the key comes
/// from the environment variable `env`. Clients built from
/// [`key_source`](PromptKeySelector::key_source) see the entered key on
/// their next request.
pub struct PromptKeySelector<L> {
    key: SharedKey,
    env: String,
    input: L,
}

impl<L: LineSource> PromptKeySelector<L> {
    pub fn new(env: impl Into<String>, input: L) -> Self {
        Self {
            key: SharedKey::new(),
            env: env.into(),
            input,
        }
    }

    /// Key source for clients that should use the selected key.
    pub fn key_source(&self) -> KeySource {
        KeySource::Shared {
            key: self.key.clone(),
            env: self.env.clone(),
        }
    }
}

impl<L: LineSource> KeySelector for PromptKeySelector<L> {
    fn has_selected_key(&self) -> bool {
        self.key_source().is_available()
    }

    fn open_select_key(&mut self, prompt: &mut dyn Write) -> io::Result<()> {
        write!(prompt, "Enter API key: ")?;
        prompt.flush()?;

        match self.input.next_line()? {
            Some(key) if !key.trim().is_empty() => {
                self.key.set(&key);
                log::info!("API key selected");
            }
            _ => log::warn!("No API key entered"),
        }
        Ok(())
    }
}
