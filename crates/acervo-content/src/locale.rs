//! Site locales.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locale the site can be displayed in.
///
/// Only two codes are recognised; anything else falls back to [`Locale::Pt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Portuguese (default)
    #[default]
    Pt,
    /// English
    En,
}

impl Locale {
    /// Name of the cookie carrying the visitor's locale.
    pub const COOKIE: &'static str = "lang";

    /// All supported locales, default first.
    pub const ALL: [Locale; 2] = [Locale::Pt, Locale::En];

    /// The language code used by the content store.
    pub const fn code(self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }

    /// Parse an exact locale code (case-insensitive, surrounding whitespace ignored).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" => Some(Locale::Pt),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Resolve the locale from a cookie value; unknown or missing means default.
    pub fn from_cookie(value: Option<&str>) -> Self {
        value.and_then(Self::from_code).unwrap_or_default()
    }

    /// Whether this is the locale the store's untranslated fields are written in.
    pub const fn is_default(self) -> bool {
        matches!(self, Locale::Pt)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
