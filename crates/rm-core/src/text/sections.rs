use std::collections::HashMap;

/// Section labels recognized by the line-level header scan, with the
/// keywords that mark a line as that section's header.
const SECTION_HEADERS: [(&str, &[&str]); 5] = [
    (
        "experience",
        &["experience", "work history", "employment", "professional experience"],
    ),
    (
        "education",
        &["education", "academic", "degree", "university", "college"],
    ),
    (
        "skills",
        &["skills", "technical skills", "technologies", "competencies"],
    ),
    (
        "requirements",
        &["requirements", "qualifications", "must have", "required"],
    ),
    (
        "responsibilities",
        &["responsibilities", "duties", "job description", "role"],
    ),
];

/// Split a document into labeled sections by scanning lines for header
/// keywords. Text before the first recognized header lands in `general`.
/// A repeated header replaces the earlier body, keeping the last block.
pub fn split_sections(text: &str) -> HashMap<String, String> {
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut current_section = "general";
    let mut current_content: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line_lower = line.to_lowercase();
        let line_lower = line_lower.trim();

        let header = SECTION_HEADERS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| line_lower.contains(k)))
            .map(|(name, _)| *name);

        match header {
            Some(name) => {
                if !current_content.is_empty() {
                    sections.insert(current_section.to_string(), current_content.join(" "));
                }
                current_section = name;
                current_content = Vec::new();
            }
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    current_content.push(trimmed);
                }
            }
        }
    }

    if !current_content.is_empty() {
        sections.insert(current_section.to_string(), current_content.join(" "));
    }

    sections
}
