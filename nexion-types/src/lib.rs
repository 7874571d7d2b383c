//! Shared types for the Nexion site core
//!
//! This crate provides the small value types passed between the core library
//! and the command line: language codes, document slugs, and outline entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A language the site ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language code: {0:?}")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Every supported language, in switcher order.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    /// Parse a language tag or POSIX locale by its primary subtag.
    ///
    /// Accepts `"en"`, `"zh-CN"`, `"zh_CN.UTF-8"`, `"EN"`. Returns `None` for
    /// anything whose primary subtag is not a supported language.
    ///
    /// ```
    /// use nexion_types::Language;
    ///
    /// assert_eq!(Language::from_tag("zh_CN.UTF-8"), Some(Language::Zh));
    /// assert_eq!(Language::from_tag("en-US"), Some(Language::En));
    /// assert_eq!(Language::from_tag("fr"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Document slug, derived from a document's file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocSlug(pub String);

impl DocSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable label for navigation menus ("getting-started" → "Getting Started")
    pub fn nav_label(&self) -> String {
        self.0
            .split('-')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for DocSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocSlug {
    fn from(slug: &str) -> Self {
        DocSlug(slug.to_string())
    }
}

/// One row of a document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Anchor id of the heading (empty when the heading has none)
    pub id: String,
    /// Flattened heading text
    pub text: String,
    /// Heading depth, 1 to 3
    pub level: u8,
}

impl HeadingEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
        }
    }

    /// Whether this entry can be navigated to
    pub fn has_anchor(&self) -> bool {
        !self.id.is_empty()
    }
}
