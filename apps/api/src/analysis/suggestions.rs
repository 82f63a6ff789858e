//! Rule-based improvement suggestions.
//!
//! Rules run in a fixed order and every rule that matches emits one record.
//! Output order is emission order; nothing is re-ranked.

use serde::Serialize;

use crate::analysis::scoring::SkillsGaps;
use crate::analysis::vocabulary::Vocabulary;

/// Below this ATS score the résumé gets the keyword suggestion.
pub const LOW_ATS_THRESHOLD: f64 = 50.0;

/// Below this many extracted keywords the résumé is considered thin.
pub const MIN_KEYWORD_COUNT: usize = 100;

/// Companies missing more than this many keywords get their own suggestion.
const COMPANY_MISSING_THRESHOLD: usize = 3;

const SUGGESTED_TECHNICAL_LIMIT: usize = 10;
const COMPANY_MISSING_SHOWN: usize = 5;
const IMPACT_PHRASE: &str = "quantified achievements";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub priority: Priority,
    pub category: String,
    pub suggestion: String,
    pub action: String,
}

/// Everything the rules look at for one résumé.
pub struct SuggestionInput<'a> {
    pub text: &'a str,
    pub ats_score: f64,
    pub gaps: &'a SkillsGaps,
    pub found_keywords: &'a [String],
    /// Tokenized keyword count of `text`.
    pub keyword_count: usize,
}

pub fn generate_suggestions(input: &SuggestionInput<'_>, vocabulary: &Vocabulary) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if input.ats_score < LOW_ATS_THRESHOLD {
        let to_add: Vec<&str> = vocabulary
            .category("technical")
            .map(|c| c.keywords.as_slice())
            .unwrap_or_default()
            .iter()
            .take(SUGGESTED_TECHNICAL_LIMIT)
            .filter(|kw| !input.found_keywords.contains(*kw))
            .map(String::as_str)
            .collect();

        suggestions.push(Suggestion {
            priority: Priority::High,
            category: "ATS Compatibility".to_string(),
            suggestion: "Your resume has low ATS compatibility. Add more technical keywords relevant to FANG companies.".to_string(),
            action: format!("Consider adding: {}", to_add.join(", ")),
        });
    }

    for (company, gap) in input.gaps.iter() {
        if gap.missing.len() > COMPANY_MISSING_THRESHOLD {
            let name = company.as_str().to_uppercase();
            let shown: Vec<&str> = gap
                .missing
                .iter()
                .take(COMPANY_MISSING_SHOWN)
                .map(String::as_str)
                .collect();

            suggestions.push(Suggestion {
                priority: Priority::Medium,
                category: format!("{name} Optimization"),
                suggestion: format!("Missing key skills for {name}: {}", shown.join(", ")),
                action: format!("Focus area: {}", gap.focus),
            });
        }
    }

    if !input.text.to_lowercase().contains(IMPACT_PHRASE) {
        suggestions.push(Suggestion {
            priority: Priority::Medium,
            category: "Impact Metrics".to_string(),
            suggestion: "Add quantified achievements (metrics, percentages, numbers) to show impact.".to_string(),
            action: r#"Example: "Improved system performance by 40%" or "Led team of 5 engineers""#.to_string(),
        });
    }

    if input.keyword_count < MIN_KEYWORD_COUNT {
        suggestions.push(Suggestion {
            priority: Priority::Low,
            category: "Content Depth".to_string(),
            suggestion: "Resume content seems brief. Expand on technical details and achievements.".to_string(),
            action: "Add more technical depth to your projects and experience sections.".to_string(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring::analyze_skills_gap;
    use crate::analysis::vocabulary::CompanySelection;

    const IMPACT_TEXT: &str = "Delivered quantified achievements across teams";

    fn run(ats_score: f64, keyword_count: usize, text: &str, found: &[&str]) -> Vec<Suggestion> {
        let vocabulary = Vocabulary::fang();
        let gaps = SkillsGaps::default();
        let found: Vec<String> = found.iter().map(|s| s.to_string()).collect();
        generate_suggestions(
            &SuggestionInput {
                text,
                ats_score,
                gaps: &gaps,
                found_keywords: &found,
                keyword_count,
            },
            &vocabulary,
        )
    }

    fn categories(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.category.as_str()).collect()
    }

    #[test]
    fn test_ats_rule_boundary() {
        assert_eq!(categories(&run(49.999, 100, IMPACT_TEXT, &[])), vec!["ATS Compatibility"]);
        assert!(run(50.0, 100, IMPACT_TEXT, &[]).is_empty());
    }

    #[test]
    fn test_content_depth_boundary() {
        assert_eq!(categories(&run(80.0, 99, IMPACT_TEXT, &[])), vec!["Content Depth"]);
        assert!(run(80.0, 100, IMPACT_TEXT, &[]).is_empty());
    }

    #[test]
    fn test_ats_action_lists_first_ten_technical_minus_found() {
        let s = run(10.0, 500, IMPACT_TEXT, &["python", "go", "react"]);
        assert_eq!(s[0].priority, Priority::High);
        assert_eq!(
            s[0].action,
            "Consider adding: java, javascript, c++, c#, rust, scala, kotlin"
        );
    }

    #[test]
    fn test_impact_phrase_is_case_insensitive() {
        assert!(run(80.0, 500, "QUANTIFIED Achievements listed", &[]).is_empty());
        let s = run(80.0, 500, "Built things", &[]);
        assert_eq!(categories(&s), vec!["Impact Metrics"]);
        assert_eq!(s[0].priority, Priority::Medium);
    }

    #[test]
    fn test_company_rule_and_emission_order() {
        let vocabulary = Vocabulary::fang();
        // meta misses 6 and google 4; amazon and netflix miss exactly 3
        let text = "python java aws";
        let gaps = analyze_skills_gap(text, &vocabulary, CompanySelection::All);
        let found = vec!["python".to_string(), "java".to_string(), "aws".to_string()];

        let suggestions = generate_suggestions(
            &SuggestionInput {
                text,
                ats_score: 5.0,
                gaps: &gaps,
                found_keywords: &found,
                keyword_count: 2,
            },
            &vocabulary,
        );

        assert_eq!(
            categories(&suggestions),
            vec![
                "ATS Compatibility",
                "META Optimization",
                "GOOGLE Optimization",
                "Impact Metrics",
                "Content Depth",
            ]
        );

        let meta = &suggestions[1];
        assert_eq!(
            meta.suggestion,
            "Missing key skills for META: react, graphql, php, hack, distributed systems"
        );
        assert_eq!(meta.action, "Focus area: Social platforms, VR/AR, AI/ML");
        assert_eq!(suggestions.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
    }
}
