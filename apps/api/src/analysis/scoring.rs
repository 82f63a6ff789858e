//! Keyword coverage scoring.
//!
//! Matching is case-insensitive substring containment against the whole
//! document, not token-aware: `go` matches inside `golang` and `going`. The
//! published scores depend on this, so it stays.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::analysis::vocabulary::{Company, CompanySelection, Vocabulary};

/// Missing keywords kept after scoring.
pub const MISSING_KEYWORD_LIMIT: usize = 20;

/// Found-keyword count that earns the full keyword-volume component.
const KEYWORD_VOLUME_TARGET: f64 = 30.0;

const ATS_WEIGHT: f64 = 0.6;
const VOLUME_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore {
    /// 0 to 100
    pub ats_score: f64,
    /// Every matched keyword, in vocabulary order.
    pub found: Vec<String>,
    /// First `MISSING_KEYWORD_LIMIT` unmatched keywords, in vocabulary order.
    pub missing: Vec<String>,
}

/// Scores `text` against every keyword in `vocabulary`.
///
/// `ats_score = 100 * found / total`, capped at 100; 0 for an empty vocabulary.
pub fn score_keywords(text: &str, vocabulary: &Vocabulary) -> KeywordScore {
    let text_lower = text.to_lowercase();

    let mut found = Vec::new();
    let mut missing = Vec::new();
    let mut total = 0usize;

    for keyword in vocabulary.all_keywords() {
        total += 1;
        if text_lower.contains(&keyword.to_lowercase()) {
            found.push(keyword.to_string());
        } else {
            missing.push(keyword.to_string());
        }
    }

    let ats_score = if total > 0 {
        (found.len() as f64 / total as f64 * 100.0).min(100.0)
    } else {
        0.0
    };
    missing.truncate(MISSING_KEYWORD_LIMIT);

    KeywordScore {
        ats_score,
        found,
        missing,
    }
}

/// Blends ATS coverage with raw keyword volume:
/// `0.6 * ats + 0.4 * min(found / 30 * 100, 100)`.
pub fn overall_score(ats_score: f64, found_count: usize) -> f64 {
    let volume = (found_count as f64 / KEYWORD_VOLUME_TARGET * 100.0).min(100.0);
    ATS_WEIGHT * ats_score + VOLUME_WEIGHT * volume
}

/// Matched/missing split for one company profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyGap {
    pub missing: Vec<String>,
    pub matched: Vec<String>,
    pub focus: String,
}

/// Gap analysis per company, in profile order. Serializes as a JSON object
/// keyed by company id with that order kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsGaps(Vec<(Company, CompanyGap)>);

impl SkillsGaps {
    pub fn iter(&self) -> impl Iterator<Item = (Company, &CompanyGap)> {
        self.0.iter().map(|(company, gap)| (*company, gap))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
impl SkillsGaps {
    pub fn get(&self, company: Company) -> Option<&CompanyGap> {
        self.iter().find(|(c, _)| *c == company).map(|(_, gap)| gap)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SkillsGaps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (company, gap) in &self.0 {
            map.serialize_entry(company.as_str(), gap)?;
        }
        map.end()
    }
}

/// Compares `text` against the selected company profiles.
pub fn analyze_skills_gap(
    text: &str,
    vocabulary: &Vocabulary,
    selection: CompanySelection,
) -> SkillsGaps {
    let text_lower = text.to_lowercase();

    let gaps = vocabulary
        .select_companies(selection)
        .into_iter()
        .map(|profile| {
            let (matched, missing): (Vec<String>, Vec<String>) = profile
                .keywords
                .iter()
                .cloned()
                .partition(|kw| text_lower.contains(&kw.to_lowercase()));
            (
                profile.id,
                CompanyGap {
                    missing,
                    matched,
                    focus: profile.focus.clone(),
                },
            )
        })
        .collect();

    SkillsGaps(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::vocabulary::{CompanyProfile, KeywordCategory};

    fn vocab(keywords: &[&str]) -> Vocabulary {
        Vocabulary {
            categories: vec![KeywordCategory {
                name: "technical".to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }],
            companies: vec![],
        }
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let score = score_keywords("I love Golang", &vocab(&["go"]));
        assert_eq!(score.found, vec!["go"]);
        assert_eq!(score.ats_score, 100.0);
    }

    #[test]
    fn test_empty_vocabulary_scores_zero() {
        let score = score_keywords("python rust go", &vocab(&[]));
        assert_eq!(score.ats_score, 0.0);
        assert!(score.found.is_empty());
        assert!(score.missing.is_empty());
    }

    #[test]
    fn test_partial_coverage() {
        let score = score_keywords("Python and Docker", &vocab(&["python", "docker", "rust", "java"]));
        assert_eq!(score.ats_score, 50.0);
        assert_eq!(score.found, vec!["python", "docker"]);
        assert_eq!(score.missing, vec!["rust", "java"]);
    }

    #[test]
    fn test_no_matches_keeps_first_twenty_missing_in_order() {
        let v = Vocabulary::fang();
        let score = score_keywords("no tech words here", &v);
        assert_eq!(score.ats_score, 0.0);
        assert!(score.found.is_empty());
        let expected: Vec<_> = v.all_keywords().take(20).collect();
        assert_eq!(score.missing, expected);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let v = Vocabulary::fang();
        let everything: String = v.all_keywords().collect::<Vec<_>>().join(" ");
        let score = score_keywords(&everything, &v);
        assert_eq!(score.ats_score, 100.0);
        assert_eq!(score.found.len(), 69);
        assert!(score.missing.is_empty());
    }

    #[test]
    fn test_found_is_not_truncated_here() {
        let v = Vocabulary::fang();
        let everything: String = v.all_keywords().collect::<Vec<_>>().join("\n");
        assert!(score_keywords(&everything, &v).found.len() > 30);
    }

    #[test]
    fn test_overall_score_blend() {
        // 0.6*40 + 0.4*50 = 44
        assert!((overall_score(40.0, 15) - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_score_volume_capped() {
        // 0.6*100 + 0.4*min(200, 100) = 100
        assert!((overall_score(100.0, 60) - 100.0).abs() < 1e-9);
        assert_eq!(overall_score(0.0, 0), 0.0);
    }

    #[test]
    fn test_skills_gap_all_companies_in_order() {
        let gaps = analyze_skills_gap(
            "Java and Python engineer on distributed systems",
            &Vocabulary::fang(),
            CompanySelection::All,
        );
        let order: Vec<_> = gaps.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Company::ALL.to_vec());

        let amazon = gaps.get(Company::Amazon).unwrap();
        assert_eq!(amazon.matched, vec!["java", "distributed systems"]);
        assert_eq!(amazon.missing, vec!["aws", "scalability", "customer obsession"]);
        assert_eq!(amazon.focus, "E-commerce, cloud services, scalability");
    }

    #[test]
    fn test_skills_gap_single_and_unknown() {
        let v = Vocabulary::fang();
        let one = analyze_skills_gap("react", &v, CompanySelection::One(Company::Meta));
        assert_eq!(one.len(), 1);
        assert_eq!(one.get(Company::Meta).unwrap().matched, vec!["react"]);

        assert!(analyze_skills_gap("react", &v, CompanySelection::Unknown).is_empty());
    }

    #[test]
    fn test_skills_gaps_serialize_as_ordered_object() {
        let v = Vocabulary {
            categories: vec![],
            companies: vec![
                CompanyProfile {
                    id: Company::Netflix,
                    keywords: vec!["java".to_string()],
                    focus: "Streaming".to_string(),
                },
                CompanyProfile {
                    id: Company::Amazon,
                    keywords: vec!["aws".to_string()],
                    focus: "Cloud".to_string(),
                },
            ],
        };
        let gaps = analyze_skills_gap("java", &v, CompanySelection::All);
        let json = serde_json::to_string(&gaps).unwrap();
        assert_eq!(
            json,
            r#"{"netflix":{"missing":[],"matched":["java"],"focus":"Streaming"},"amazon":{"missing":["aws"],"matched":[],"focus":"Cloud"}}"#
        );
    }
}
