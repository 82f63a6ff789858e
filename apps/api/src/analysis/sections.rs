use serde::Serialize;

/// Trigger words per section, checked in this order. The first section
/// with a trigger contained in a line becomes the current section.
const SECTION_TRIGGERS: &[(Section, &[&str])] = &[
    (
        Section::Experience,
        &["experience", "work", "employment", "professional"],
    ),
    (
        Section::Education,
        &["education", "academic", "university", "degree"],
    ),
    (Section::Skills, &["skills", "technical", "competencies"]),
    (Section::Projects, &["projects", "project", "portfolio"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Projects,
}

/// Résumé lines bucketed by section, trimmed, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

impl Sections {
    fn bucket_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
        }
    }
}

/// Single forward pass over the lines. Header lines are kept as content of
/// the section they open; lines before the first header are dropped.
pub fn split_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<Section> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if let Some(section) = detect_section(&lower) {
            current = Some(section);
        }

        if let Some(section) = current {
            if !trimmed.is_empty() {
                sections.bucket_mut(section).push(trimmed.to_string());
            }
        }
    }

    sections
}

fn detect_section(line_lower: &str) -> Option<Section> {
    SECTION_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| line_lower.contains(t)))
        .map(|(section, _)| *section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_open_sections_and_are_kept() {
        let s = split_sections("Experience\nBuilt X\nEducation\nBS CS");
        assert_eq!(s.experience, vec!["Experience", "Built X"]);
        assert_eq!(s.education, vec!["Education", "BS CS"]);
        assert!(s.skills.is_empty());
        assert!(s.projects.is_empty());
    }

    #[test]
    fn test_lines_before_first_header_dropped() {
        let s = split_sections("Jane Doe\njane@example.com\nSkills\nRust, Go");
        assert_eq!(s.skills, vec!["Skills", "Rust, Go"]);
        assert!(s.experience.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped_and_lines_trimmed() {
        let s = split_sections("Projects\n\n   \n  Ray tracer  \r\n");
        assert_eq!(s.projects, vec!["Projects", "Ray tracer"]);
    }

    #[test]
    fn test_experience_triggers_win_over_later_sections() {
        // "technical" would open skills, but "work" is checked first
        let s = split_sections("Technical work\nKafka");
        assert_eq!(s.experience, vec!["Technical work", "Kafka"]);
        assert!(s.skills.is_empty());
    }

    #[test]
    fn test_content_lines_can_switch_sections() {
        // substring triggers are not header-aware
        let s = split_sections("Education\nBS, State University\nLed a project on search");
        assert_eq!(s.education, vec!["Education", "BS, State University"]);
        assert_eq!(s.projects, vec!["Led a project on search"]);
    }

    #[test]
    fn test_serializes_fixed_keys_in_order() {
        let json = serde_json::to_string(&split_sections("")).unwrap();
        assert_eq!(
            json,
            r#"{"experience":[],"education":[],"skills":[],"projects":[]}"#
        );
    }
}
