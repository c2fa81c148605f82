use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Registry keys of the three canonical sections.
pub const PERSONAL_SUMMARY: &str = "personalSummary";
pub const WORK_EXPERIENCE: &str = "workExperience";
pub const PROJECTS: &str = "projects";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

impl WorkExperience {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.company.is_empty()
            && self.duration.is_empty()
            && self.bullets.is_empty()
    }

    /// An entry opened by its title line can still take the employer that follows it.
    pub fn accepts_company(&self) -> bool {
        self.company.is_empty() && self.bullets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub bullets: Vec<String>,
}

impl Project {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.bullets.is_empty()
    }
}

/// Shape of a section's content, as named in the section synonym table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Text,
    List,
    Experience,
    Projects,
}

/// Closed union of every section payload. Serialises as `{"type": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
    Experience(Vec<WorkExperience>),
    Projects(Vec<Project>),
}

impl SectionContent {
    pub fn empty(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Text => SectionContent::Text(String::new()),
            SectionType::List => SectionContent::List(Vec::new()),
            SectionType::Experience => SectionContent::Experience(Vec::new()),
            SectionType::Projects => SectionContent::Projects(Vec::new()),
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            SectionContent::Text(_) => SectionType::Text,
            SectionContent::List(_) => SectionType::List,
            SectionContent::Experience(_) => SectionType::Experience,
            SectionContent::Projects(_) => SectionType::Projects,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::List(items) => items.is_empty(),
            SectionContent::Experience(entries) => entries.is_empty(),
            SectionContent::Projects(entries) => entries.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSection {
    #[serde(flatten)]
    pub content: SectionContent,
    /// The header line exactly as it appeared in the document.
    pub original_header: String,
}

impl DynamicSection {
    pub fn new(section_type: SectionType, original_header: impl Into<String>) -> Self {
        Self {
            content: SectionContent::empty(section_type),
            original_header: original_header.into(),
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.content.section_type()
    }
}

/// Detected sections keyed by canonical or header-derived name, in document order.
pub type SectionRegistry = IndexMap<String, DynamicSection>;

/// The resume model handed to the editor, the exporter and the suggestion stub.
///
/// `personal_summary`, `work_experience` and `projects` mirror the matching
/// registry entries; `dynamic_sections` keeps the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeSection {
    pub personal_summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dynamic_sections: SectionRegistry,
}

impl ResumeSection {
    /// Writes the canonical fields back into their registry mirrors, when present.
    pub fn sync_dynamic_sections(&mut self) {
        if let Some(section) = self.dynamic_sections.get_mut(PERSONAL_SUMMARY) {
            if let SectionContent::Text(text) = &mut section.content {
                text.clone_from(&self.personal_summary);
            }
        }
        if let Some(section) = self.dynamic_sections.get_mut(WORK_EXPERIENCE) {
            if let SectionContent::Experience(entries) = &mut section.content {
                entries.clone_from(&self.work_experience);
            }
        }
        if let Some(section) = self.dynamic_sections.get_mut(PROJECTS) {
            if let SectionContent::Projects(entries) = &mut section.content {
                entries.clone_from(&self.projects);
            }
        }
    }
}
