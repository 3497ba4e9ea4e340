/*!
 * Speaker and name translation.
 *
 * A name dictionary maps raw name tokens found in subtitle text to their
 * replacements. The text form has one `source=target` mapping per line.
 */

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::SubtitleError;

/// Lookup table used to replace name tokens in subtitle text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameDictionary {
    names: BTreeMap<String, String>,

    // @field: Alternation of all sources, built on first use
    #[serde(skip)]
    matcher: OnceCell<Option<Regex>>,
}

impl PartialEq for NameDictionary {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl NameDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(source, target)` pairs; later pairs win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dictionary = Self::new();
        for (source, target) in pairs {
            dictionary.insert(source, target);
        }
        dictionary
    }

    /// Parse the line based dictionary format.
    ///
    /// Blank lines and lines starting with `#` are ignored. Both sides of the
    /// `=` are trimmed and the target may be empty, which removes the token.
    pub fn parse(text: &str) -> Result<Self, SubtitleError> {
        let mut dictionary = Self::new();

        for (i, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let invalid = || SubtitleError::InvalidDictionaryLine {
                line_number: i + 1,
                line: raw_line.to_string(),
            };

            let (source, target) = line.split_once('=').ok_or_else(invalid)?;
            let source = source.trim();
            if source.is_empty() {
                return Err(invalid());
            }

            dictionary.insert(source, target.trim());
        }

        Ok(dictionary)
    }

    /// Add or replace a mapping
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        if source.is_empty() {
            return;
        }
        self.names.insert(source, target.into());
        self.matcher = OnceCell::new();
    }

    /// Merge another dictionary into this one, the other side wins on conflicts
    pub fn extend(&mut self, other: &NameDictionary) {
        for (source, target) in &other.names {
            self.insert(source.clone(), target.clone());
        }
    }

    /// Look up the replacement for a source token
    pub fn get(&self, source: &str) -> Option<&str> {
        self.names.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Replace every known name in `text`.
    ///
    /// Longer sources take priority over shorter ones starting at the same
    /// position, and replaced output is never scanned again.
    pub fn translate(&self, text: &str) -> String {
        match self.matcher() {
            Some(regex) => regex
                .replace_all(text, |caps: &regex::Captures| {
                    let found = &caps[0];
                    self.get(found).unwrap_or(found).to_string()
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    fn matcher(&self) -> Option<&Regex> {
        self.matcher
            .get_or_init(|| {
                if self.names.is_empty() {
                    return None;
                }
                let mut sources: Vec<&String> = self.names.keys().collect();
                // Leftmost-first alternation, so list longer sources first
                sources.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
                let pattern = sources
                    .iter()
                    .map(|source| regex::escape(source))
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&pattern).ok()
            })
            .as_ref()
    }
}
