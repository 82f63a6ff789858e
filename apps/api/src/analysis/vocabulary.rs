//! Keyword tables the scorer matches against.
//!
//! Built once at startup and shared read-only. Order matters everywhere in
//! here: it decides which missing keywords survive truncation and the order
//! companies appear in the report.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A named, ordered list of lowercase keywords.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Company {
    Meta,
    Amazon,
    Netflix,
    Google,
}

impl Company {
    pub const ALL: [Company; 4] = [
        Company::Meta,
        Company::Amazon,
        Company::Netflix,
        Company::Google,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Meta => "meta",
            Company::Amazon => "amazon",
            Company::Netflix => "netflix",
            Company::Google => "google",
        }
    }

    pub fn parse(id: &str) -> Option<Company> {
        Company::ALL.into_iter().find(|c| c.as_str() == id)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyProfile {
    pub id: Company,
    pub keywords: Vec<String>,
    pub focus: String,
}

/// Which company profiles a request wants gap analysis for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanySelection {
    #[default]
    All,
    One(Company),
    /// An id we have no profile for. Produces an empty gap report.
    Unknown,
}

impl CompanySelection {
    pub fn parse(value: &str) -> CompanySelection {
        if value == "all" {
            return CompanySelection::All;
        }
        match Company::parse(value) {
            Some(company) => CompanySelection::One(company),
            None => CompanySelection::Unknown,
        }
    }
}

/// The full keyword configuration: scoring categories plus company profiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vocabulary {
    pub categories: Vec<KeywordCategory>,
    pub companies: Vec<CompanyProfile>,
}

impl Vocabulary {
    /// Built-in tables tuned for large-tech résumés.
    pub fn fang() -> Self {
        Self {
            categories: vec![
                category(
                    "technical",
                    &[
                        "python", "java", "javascript", "c++", "c#", "go", "rust", "scala",
                        "kotlin", "react", "angular", "vue", "node.js", "express", "django",
                        "flask", "spring", "aws", "azure", "gcp", "docker", "kubernetes",
                        "microservices", "api", "rest", "sql", "nosql", "mongodb", "postgresql",
                        "mysql", "redis", "cassandra", "machine learning", "deep learning", "ai",
                        "neural networks", "tensorflow", "pytorch", "data structures",
                        "algorithms", "system design", "distributed systems", "agile", "scrum",
                        "ci/cd", "git", "jenkins", "terraform", "ansible",
                    ],
                ),
                category(
                    "soft_skills",
                    &[
                        "leadership", "collaboration", "communication", "problem-solving",
                        "critical thinking", "mentoring", "teamwork", "adaptability",
                        "innovation", "creativity",
                    ],
                ),
                category(
                    "quantitative",
                    &[
                        "metrics", "optimization", "scalability", "performance", "efficiency",
                        "throughput", "latency", "availability", "reliability", "analytics",
                    ],
                ),
            ],
            companies: vec![
                profile(
                    Company::Meta,
                    &["react", "graphql", "php", "hack", "distributed systems", "machine learning"],
                    "Social platforms, VR/AR, AI/ML",
                ),
                profile(
                    Company::Amazon,
                    &["aws", "java", "distributed systems", "scalability", "customer obsession"],
                    "E-commerce, cloud services, scalability",
                ),
                profile(
                    Company::Netflix,
                    &["java", "python", "microservices", "streaming", "recommendation systems"],
                    "Streaming, recommendation algorithms, content delivery",
                ),
                profile(
                    Company::Google,
                    &["python", "java", "c++", "machine learning", "algorithms", "distributed systems"],
                    "Search, AI/ML, cloud infrastructure, algorithms",
                ),
            ],
        }
    }

    /// Parses a vocabulary override. Keywords are lowercased so matching
    /// against lowercased text stays case-insensitive.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut vocabulary: Vocabulary =
            toml::from_str(content).context("Failed to parse vocabulary TOML")?;

        for category in &mut vocabulary.categories {
            lowercase_all(&mut category.keywords);
        }
        for company in &mut vocabulary.companies {
            lowercase_all(&mut company.keywords);
        }

        for (i, company) in vocabulary.companies.iter().enumerate() {
            if vocabulary.companies[..i].iter().any(|c| c.id == company.id) {
                bail!("Company '{}' is defined more than once", company.id);
            }
        }

        Ok(vocabulary)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file at {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid vocabulary file at {}", path.display()))
    }

    /// Every keyword in category order, then keyword order.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.keywords.iter().map(String::as_str))
    }

    pub fn category(&self, name: &str) -> Option<&KeywordCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Profiles for the selection, in configured order.
    pub fn select_companies(&self, selection: CompanySelection) -> Vec<&CompanyProfile> {
        match selection {
            CompanySelection::All => self.companies.iter().collect(),
            CompanySelection::One(company) => {
                self.companies.iter().filter(|p| p.id == company).collect()
            }
            CompanySelection::Unknown => Vec::new(),
        }
    }
}

fn category(name: &str, keywords: &[&str]) -> KeywordCategory {
    KeywordCategory {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn profile(id: Company, keywords: &[&str], focus: &str) -> CompanyProfile {
    CompanyProfile {
        id,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        focus: focus.to_string(),
    }
}

fn lowercase_all(keywords: &mut [String]) {
    for keyword in keywords {
        *keyword = keyword.to_lowercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fang_category_sizes() {
        let v = Vocabulary::fang();
        let sizes: Vec<_> = v.categories.iter().map(|c| c.keywords.len()).collect();
        assert_eq!(sizes, vec![49, 10, 10]);
        assert_eq!(v.all_keywords().count(), 69);
    }

    #[test]
    fn test_fang_flatten_order_starts_with_technical() {
        let v = Vocabulary::fang();
        let first: Vec<_> = v.all_keywords().take(3).collect();
        assert_eq!(first, vec!["python", "java", "javascript"]);
        assert_eq!(v.all_keywords().last(), Some("analytics"));
    }

    #[test]
    fn test_fang_company_order() {
        let ids: Vec<_> = Vocabulary::fang().companies.iter().map(|c| c.id).collect();
        assert_eq!(ids, Company::ALL.to_vec());
    }

    #[test]
    fn test_company_selection_parse() {
        assert_eq!(CompanySelection::parse("all"), CompanySelection::All);
        assert_eq!(
            CompanySelection::parse("netflix"),
            CompanySelection::One(Company::Netflix)
        );
        assert_eq!(CompanySelection::parse("apple"), CompanySelection::Unknown);
        // ids are matched exactly, like the form values
        assert_eq!(CompanySelection::parse("Meta"), CompanySelection::Unknown);
    }

    #[test]
    fn test_select_companies() {
        let v = Vocabulary::fang();
        assert_eq!(v.select_companies(CompanySelection::All).len(), 4);
        let one = v.select_companies(CompanySelection::One(Company::Google));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].focus, "Search, AI/ML, cloud infrastructure, algorithms");
        assert!(v.select_companies(CompanySelection::Unknown).is_empty());
    }

    #[test]
    fn test_toml_override_preserves_order_and_lowercases() {
        let toml = r#"
            [[categories]]
            name = "quantitative"
            keywords = ["Latency", "throughput"]

            [[categories]]
            name = "technical"
            keywords = ["Zig", "rust"]

            [[companies]]
            id = "google"
            keywords = ["Go"]
            focus = "Search"
        "#;
        let v = Vocabulary::from_toml_str(toml).unwrap();
        let all: Vec<_> = v.all_keywords().collect();
        assert_eq!(all, vec!["latency", "throughput", "zig", "rust"]);
        assert_eq!(v.companies[0].id, Company::Google);
        assert_eq!(v.companies[0].keywords, vec!["go"]);
    }

    #[test]
    fn test_toml_rejects_unknown_company() {
        let toml = r#"
            categories = []

            [[companies]]
            id = "apple"
            keywords = []
            focus = ""
        "#;
        assert!(Vocabulary::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_toml_rejects_duplicate_company() {
        let toml = r#"
            categories = []

            [[companies]]
            id = "meta"
            keywords = []
            focus = "a"

            [[companies]]
            id = "meta"
            keywords = []
            focus = "b"
        "#;
        assert!(Vocabulary::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = Vocabulary::load(Path::new("/nonexistent/vocab.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read vocabulary file"));
    }
}
