//! Analysis pipeline: one extracted résumé text in, one report out.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::scoring::{analyze_skills_gap, overall_score, score_keywords, SkillsGaps};
use crate::analysis::sections::{split_sections, Sections};
use crate::analysis::suggestions::{generate_suggestions, Suggestion, SuggestionInput};
use crate::analysis::tokenizer::KeywordTokenizer;
use crate::analysis::vocabulary::{CompanySelection, Vocabulary};
use crate::config::Config;

/// Texts with fewer trimmed chars than this are rejected before analysis.
pub const MIN_TEXT_CHARS: usize = 50;

/// Found keywords included in the report.
pub const FOUND_KEYWORD_LIMIT: usize = 30;

const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub word_count: usize,
    pub keyword_count: usize,
    /// 0 to 100, two decimals
    pub ats_score: f64,
    /// 0 to 100, two decimals
    pub overall_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSummary {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Per-request analysis result. Field order is the JSON field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub stats: Stats,
    pub keywords: KeywordSummary,
    pub skills_gaps: SkillsGaps,
    pub sections: Sections,
    pub suggestions: Vec<Suggestion>,
    pub resume_preview: String,
}

/// Immutable analysis configuration shared by every request.
#[derive(Debug, Clone)]
pub struct Analyzer {
    vocabulary: Vocabulary,
    tokenizer: KeywordTokenizer,
}

impl Analyzer {
    pub fn new(vocabulary: Vocabulary, tokenizer: KeywordTokenizer) -> Self {
        Self {
            vocabulary,
            tokenizer,
        }
    }

    /// Loads the vocabulary override if configured, otherwise the built-in
    /// tables. A configured but unreadable vocabulary fails startup.
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => {
                let vocabulary = Vocabulary::load(path)?;
                info!("Loaded vocabulary from {}", path.display());
                vocabulary
            }
            None => Vocabulary::fang(),
        };
        info!(
            "Vocabulary: {} keywords in {} categories, {} company profiles",
            vocabulary.all_keywords().count(),
            vocabulary.categories.len(),
            vocabulary.companies.len()
        );

        let tokenizer = KeywordTokenizer::from_config(config);
        info!("Tokenizer strategy: {:?}", tokenizer.strategy());

        Ok(Self::new(vocabulary, tokenizer))
    }

    pub fn analyze(&self, text: &str, selection: CompanySelection) -> AnalysisReport {
        let keywords = self.tokenizer.tokenize(text);
        let score = score_keywords(text, &self.vocabulary);
        let gaps = analyze_skills_gap(text, &self.vocabulary, selection);
        let sections = split_sections(text);

        let suggestions = generate_suggestions(
            &SuggestionInput {
                text,
                ats_score: score.ats_score,
                gaps: &gaps,
                found_keywords: &score.found,
                keyword_count: keywords.len(),
            },
            &self.vocabulary,
        );

        let overall = overall_score(score.ats_score, score.found.len());
        debug!(
            "ats={:.2} overall={overall:.2} found={} tokens={} suggestions={}",
            score.ats_score,
            score.found.len(),
            keywords.len(),
            suggestions.len()
        );

        let mut found = score.found;
        found.truncate(FOUND_KEYWORD_LIMIT);

        AnalysisReport {
            stats: Stats {
                word_count: text.split_whitespace().count(),
                keyword_count: keywords.len(),
                ats_score: round2(score.ats_score),
                overall_score: round2(overall),
            },
            keywords: KeywordSummary {
                found,
                missing: score.missing,
            },
            skills_gaps: gaps,
            sections,
            suggestions,
            resume_preview: preview(text),
        }
    }
}

/// Whether `text` carries enough content to analyze.
pub fn has_sufficient_text(text: &str) -> bool {
    text.trim().chars().count() >= MIN_TEXT_CHARS
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First `PREVIEW_CHARS` chars, with `...` appended when cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
