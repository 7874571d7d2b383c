//! Runtime locale signals used for initial language detection.

use nexion_types::Language;

/// Environment variables consulted for the process locale, highest priority first
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// Locale tags reported by the runtime, most preferred first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleSignal {
    tags: Vec<String>,
}

impl LocaleSignal {
    /// No runtime locale available
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the process locale from the environment
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`LocaleSignal::from_env`] with an injectable variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tag = LOCALE_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        Self {
            tags: tag.into_iter().collect(),
        }
    }

    /// Parse an Accept-Language style list (`"zh-CN,zh;q=0.9,en;q=0.8"`)
    pub fn from_accept_language(header: &str) -> Self {
        let mut weighted: Vec<(f32, String)> = header
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }
                let quality = pieces
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (quality > 0.0).then(|| (quality, tag.to_string()))
            })
            .collect();

        // Stable sort keeps header order among equal weights
        weighted.sort_by(|a, b| b.0.total_cmp(&a.0));

        Self {
            tags: weighted.into_iter().map(|(_, tag)| tag).collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Supported languages named by the signal, in preference order
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.tags.iter().filter_map(|tag| Language::from_tag(tag))
    }
}
