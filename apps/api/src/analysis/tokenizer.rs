//! Keyword tokenizer.
//!
//! Two strategies, picked per call from what data is loaded:
//! - `Segmented`: Unicode word segmentation with stop-word removal.
//! - `Whitespace`: plain whitespace split, no stop-word removal. Used when no
//!   stop-word list could be loaded. It has no failure path.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::Config;

/// Standard English stop-word list.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Tokens at or below this many chars are dropped.
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn english() -> Self {
        Self(ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect())
    }

    /// One word per line. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Self {
        Self(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_lowercase)
                .collect(),
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop-word list at {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerStrategy {
    Segmented,
    Whitespace,
}

#[derive(Debug, Clone)]
pub struct KeywordTokenizer {
    stop_words: Option<StopWords>,
}

impl KeywordTokenizer {
    pub fn new(stop_words: Option<StopWords>) -> Self {
        Self { stop_words }
    }

    /// Builds the tokenizer from config. A configured stop-word file that
    /// cannot be read downgrades to the whitespace strategy instead of
    /// failing startup.
    pub fn from_config(config: &Config) -> Self {
        if config.disable_stopwords {
            info!("Stop-word removal disabled; using whitespace tokenizer");
            return Self::new(None);
        }

        let stop_words = match &config.stopwords_path {
            Some(path) => match StopWords::load(path) {
                Ok(words) if words.is_empty() => {
                    warn!(
                        "Stop-word list at {} is empty; using whitespace tokenizer",
                        path.display()
                    );
                    None
                }
                Ok(words) => {
                    info!("Loaded {} stop words from {}", words.len(), path.display());
                    Some(words)
                }
                Err(e) => {
                    warn!("{e:#}; falling back to whitespace tokenizer");
                    None
                }
            },
            None => Some(StopWords::english()),
        };

        Self::new(stop_words)
    }

    pub fn strategy(&self) -> TokenizerStrategy {
        if self.stop_words.is_some() {
            TokenizerStrategy::Segmented
        } else {
            TokenizerStrategy::Whitespace
        }
    }

    /// Lowercase alphanumeric tokens longer than two chars, in document order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = preprocess(text);

        match &self.stop_words {
            Some(stop_words) => cleaned
                .unicode_words()
                .filter(|w| is_keyword(w) && !stop_words.contains(w))
                .map(String::from)
                .collect(),
            None => cleaned
                .split_whitespace()
                .filter(|w| is_keyword(w))
                .map(String::from)
                .collect(),
        }
    }
}

/// Lowercases and replaces everything except word chars and whitespace
/// with a space.
pub fn preprocess(text: &str) -> String {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    let re = NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));
    re.replace_all(&text.to_lowercase(), " ").into_owned()
}

fn is_keyword(word: &str) -> bool {
    word.chars().count() > MIN_TOKEN_CHARS && word.chars().all(char::is_alphanumeric)
}
