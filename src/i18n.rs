//! Language selection over a closed set of four locales.
//!
//! Translation dictionaries live in `locales/*.json` and are compiled in by
//! rust-i18n. Activating a language swaps the active dictionary for all
//! currently rendered text; the persisted code lives in the preference store
//! under `ui.language`.

/// Preference store key for the persisted language code.
pub const LANGUAGE_KEY: &str = "ui.language";

/// The closed set of supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Hi,
    Pa,
    Ta,
}

impl Language {
    /// All supported languages, in selection-modal order.
    pub const ALL: [Language; 4] = [Language::En, Language::Hi, Language::Pa, Language::Ta];

    /// Two-letter locale code, as persisted and as used by the dictionaries.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Pa => "pa",
            Language::Ta => "ta",
        }
    }

    /// Native display name shown in the language selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Pa => "ਪੰਜਾਬੀ",
            Language::Ta => "தமிழ்",
        }
    }

    /// Parse a persisted code. Unknown codes yield `None`; callers fall back
    /// to the default rather than erroring (the selector only offers valid
    /// choices, so an unknown code means a hand-edited store).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "pa" => Some(Language::Pa),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }

    /// Make this language's dictionary the active one.
    pub fn activate(self) {
        rust_i18n::set_locale(self.code());
        tracing::debug!(locale = self.code(), "Activated locale");
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}
