use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── OPTION KEY ────────────────────────────────────────────────────────────────
//

/// Letter of an answer option column (`a` through `f`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl OptionKey {
    /// All keys in column order.
    pub const ALL: [OptionKey; 6] = [
        OptionKey::A,
        OptionKey::B,
        OptionKey::C,
        OptionKey::D,
        OptionKey::E,
        OptionKey::F,
    ];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            OptionKey::A => 'a',
            OptionKey::B => 'b',
            OptionKey::C => 'c',
            OptionKey::D => 'd',
            OptionKey::E => 'e',
            OptionKey::F => 'f',
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown option key: {raw:?}")]
pub struct ParseOptionKeyError {
    raw: String,
}

impl FromStr for OptionKey {
    type Err = ParseOptionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(OptionKey::A),
            "b" => Ok(OptionKey::B),
            "c" => Ok(OptionKey::C),
            "d" => Ok(OptionKey::D),
            "e" => Ok(OptionKey::E),
            "f" => Ok(OptionKey::F),
            _ => Err(ParseOptionKeyError { raw: s.to_string() }),
        }
    }
}

//
// ─── OPTION TABLE ──────────────────────────────────────────────────────────────
//

/// Fixed six-slot table of option texts.
///
/// Blank texts and spreadsheet `nan` placeholders are stored as absent, so a
/// present entry is always selectable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTable {
    slots: [Option<String>; 6],
}

impl OptionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; see [`OptionTable::set`].
    #[must_use]
    pub fn with(mut self, key: OptionKey, text: impl Into<String>) -> Self {
        self.set(key, text);
        self
    }

    /// Store `text` under `key`, treating blank and `nan` values as absent.
    pub fn set(&mut self, key: OptionKey, text: impl Into<String>) {
        let text = text.into();
        self.slots[key.index()] = if is_blank(&text) { None } else { Some(text) };
    }

    #[must_use]
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.slots[key.index()].as_deref()
    }

    #[must_use]
    pub fn contains(&self, key: OptionKey) -> bool {
        self.slots[key.index()].is_some()
    }

    /// Present options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> + '_ {
        OptionKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|text| (key, text)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_blank(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}
