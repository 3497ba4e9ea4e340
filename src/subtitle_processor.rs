use std::fmt;
use std::str::FromStr;
use anyhow::anyhow;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use crate::formatter::{self, EOL};
use crate::name_dictionary::NameDictionary;

// @module: Subtitle entry model, parsing and serialization

// @const: Runs of whitespace inside a text line
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Layout of the text lines that follow index and timestamp
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Up to two text lines, first language then second language
    #[default]
    Bilingual,
    /// Single-language raw captions, all text lines merged into one
    #[serde(rename = "cc")]
    RawCaption,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bilingual => write!(f, "bilingual"),
            Self::RawCaption => write!(f, "cc"),
        }
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "bilingual" | "subtitles" => Ok(Self::Bilingual),
            "cc" | "raw" => Ok(Self::RawCaption),
            _ => Err(anyhow!("Invalid subtitle dialect: {}", s)),
        }
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence label, kept verbatim
    pub index: String,

    // @field: Timing line, never interpreted
    pub timestamp: String,

    // @field: First language line, or the merged caption text
    pub primary_text: Option<String>,

    // @field: Second language line
    pub secondary_text: Option<String>,
}

impl SubtitleEntry {
    /// Creates an entry without any text lines
    pub fn new(index: impl Into<String>, timestamp: impl Into<String>) -> Self {
        SubtitleEntry {
            index: index.into(),
            timestamp: timestamp.into(),
            primary_text: None,
            secondary_text: None,
        }
    }

    pub fn with_primary(mut self, text: impl Into<String>) -> Self {
        self.primary_text = non_empty(text.into());
        self
    }

    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = non_empty(text.into());
        self
    }

    /// Parse a group in the given dialect
    pub fn parse(group: &str, dialect: Dialect) -> Result<Self, SubtitleError> {
        match dialect {
            Dialect::Bilingual => Self::parse_bilingual(group),
            Dialect::RawCaption => Self::parse_raw_caption(group),
        }
    }

    /// Parse a raw caption group: every line after the timestamp is joined
    /// with a single space into the primary text.
    pub fn parse_raw_caption(group: &str) -> Result<Self, SubtitleError> {
        let (entry, payload) = Self::parse_header(group)?;
        Ok(entry.with_primary(payload.join(" ")))
    }

    /// Parse a bilingual group.
    ///
    /// A single text line is taken as the second language line. Two lines map
    /// to primary then secondary, and anything longer is rejected.
    pub fn parse_bilingual(group: &str) -> Result<Self, SubtitleError> {
        let (entry, payload) = Self::parse_header(group)?;
        match payload.as_slice() {
            [] => Ok(entry),
            [secondary] => Ok(entry.with_secondary(*secondary)),
            [primary, secondary] => Ok(entry.with_primary(*primary).with_secondary(*secondary)),
            _ => Err(SubtitleError::TooManyLines { group: group.to_string() }),
        }
    }

    // @returns: Entry with index and timestamp, plus the remaining lines
    fn parse_header(group: &str) -> Result<(Self, Vec<&str>), SubtitleError> {
        let mut lines = group.trim_end().lines();
        let malformed = || SubtitleError::MalformedEntry { group: group.to_string() };

        let index = lines.next().map(str::trim).filter(|l| !l.is_empty()).ok_or_else(malformed)?;
        let timestamp = lines.next().filter(|l| !l.is_empty()).ok_or_else(malformed)?;

        Ok((Self::new(index, timestamp), lines.collect()))
    }

    /// Collapse whitespace runs in both text lines
    pub fn normalize_spacing(mut self) -> Self {
        self.primary_text = self.primary_text.and_then(|t| non_empty(collapse_whitespace(&t)));
        self.secondary_text = self.secondary_text.and_then(|t| non_empty(collapse_whitespace(&t)));
        self
    }

    /// Replace name tokens in both text lines
    pub fn translate_names(mut self, names: &NameDictionary) -> Self {
        self.primary_text = self.primary_text.and_then(|t| non_empty(names.translate(&t)));
        self.secondary_text = self.secondary_text.and_then(|t| non_empty(names.translate(&t)));
        self
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{EOL}{}{EOL}", self.index, self.timestamp)?;
        for text in [&self.primary_text, &self.secondary_text].into_iter().flatten() {
            if !text.is_empty() {
                write!(f, "{text}{EOL}")?;
            }
        }
        Ok(())
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Concatenate entries into canonical text: one block per entry, each
/// followed by an empty line, always with CRLF line breaks.
pub fn serialize(entries: &[SubtitleEntry]) -> String {
    let mut result = String::new();
    for entry in entries {
        result.push_str(&entry.to_string());
        result.push_str(EOL);
    }
    result
}

/// Ordered subtitle entries of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCollection {
    /// Dialect the entries were parsed with
    pub dialect: Dialect,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a collection from already parsed entries
    pub fn new(dialect: Dialect, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection { dialect, entries }
    }

    /// Parse a whole document. The first bad group aborts the parse.
    pub fn parse(text: &str, dialect: Dialect) -> Result<Self, SubtitleError> {
        let entries = formatter::split_into_groups(text)
            .iter()
            .map(|group| SubtitleEntry::parse(group, dialect))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} {} entries", entries.len(), dialect);
        Ok(Self::new(dialect, entries))
    }

    /// Load a bilingual subtitle document
    pub fn from_subtitles(text: &str) -> Result<Self, SubtitleError> {
        Self::parse(text, Dialect::Bilingual)
    }

    /// Load a raw caption document
    pub fn from_cc(text: &str) -> Result<Self, SubtitleError> {
        Self::parse(text, Dialect::RawCaption)
    }

    /// Normalize spacing inside every text line
    pub fn reformat(self) -> Self {
        let entries = self.entries.into_iter().map(SubtitleEntry::normalize_spacing).collect();
        Self::new(self.dialect, entries)
    }

    /// Replace speaker and name tokens using `names`
    pub fn translate_names(self, names: &NameDictionary) -> Self {
        if names.is_empty() {
            return self;
        }
        let entries = self.entries.into_iter().map(|e| e.translate_names(names)).collect();
        Self::new(self.dialect, entries)
    }

    /// Reassign indices 1, 2, 3... in sequence order
    pub fn renumber(self) -> Self {
        let entries = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(i, mut entry)| {
                entry.index = (i + 1).to_string();
                entry
            })
            .collect();
        Self::new(self.dialect, entries)
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&serialize(&self.entries))
    }
}
