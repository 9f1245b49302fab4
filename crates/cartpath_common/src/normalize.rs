//! Text cleanup applied to item names before classification.
//!
//! Pipeline: lowercase, drop everything outside [a-z0-9 -], collapse
//! whitespace, then lemmatize token by token. Total and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Capability seam for per-token lemmatization. A linguistic lemmatizer and
/// the built-in plural folding are interchangeable here.
pub trait Lemmatizer: Send + Sync {
    /// Lemma for a token, or None to keep the token unchanged.
    fn lemma(&self, token: &str) -> Option<String>;
}

/// Folds simple English plurals: strips one trailing 's' from tokens longer
/// than three characters. Tokens ending in "ss" are left alone so a second
/// pass never changes the result again.
pub struct PluralFolding;

impl Lemmatizer for PluralFolding {
    fn lemma(&self, token: &str) -> Option<String> {
        if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
            Some(token[..token.len() - 1].to_string())
        } else {
            None
        }
    }
}

/// Deterministic item-name normalizer.
pub struct TextNormalizer {
    lemmatizer: Option<Box<dyn Lemmatizer>>,
}

impl TextNormalizer {
    /// Normalizer with the built-in plural folding lemmatizer.
    pub fn new() -> Self {
        Self {
            lemmatizer: Some(Box::new(PluralFolding)),
        }
    }

    /// Normalizer that passes tokens through unchanged.
    pub fn without_lemmatizer() -> Self {
        Self { lemmatizer: None }
    }

    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        Self {
            lemmatizer: Some(lemmatizer),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let filtered: String = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
            .collect();
        let collapsed = WHITESPACE.replace_all(&filtered, " ");
        let trimmed = collapsed.trim();

        match &self.lemmatizer {
            None => trimmed.to_string(),
            Some(lemmatizer) => trimmed
                .split(' ')
                .filter(|t| !t.is_empty())
                .map(|token| lemmatizer.lemma(token).unwrap_or_else(|| token.to_string()))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
