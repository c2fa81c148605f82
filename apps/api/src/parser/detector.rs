//! Section detector: a per-line state machine folded over the document text.
//!
//! State: the open section (name + content), plus the experience / project
//! entry currently being built inside it. A header line flushes the open entry
//! into its section, commits the section to the registry and opens the next.

use tracing::{debug, trace};

use crate::models::resume::{
    DynamicSection, Project, SectionContent, SectionRegistry, SectionType, WorkExperience,
    PERSONAL_SUMMARY,
};
use crate::parser::classifier::{
    classify_line, clean_bullet_point, clean_markdown, company_signal, detect_custom_header,
    detect_section_header, extract_duration, is_bullet_point, is_duration, is_image,
    is_job_title, is_project_name, parse_company_line, split_trailing_duration, CompanySignal,
};
use crate::parser::headers::HeaderMatch;

#[derive(Debug, Default)]
pub struct SectionDetector {
    registry: SectionRegistry,
    current_name: String,
    current: Option<DynamicSection>,
    current_experience: Option<WorkExperience>,
    current_project: Option<Project>,
    /// A leading `# Heading` held back until the next line shows whether it
    /// opens a custom section or is just a name banner.
    pending_banner: Option<(HeaderMatch, String)>,
    /// The open experience entry's company was carried over from the previous
    /// role and may still be replaced by a company line.
    inherited_company: bool,
    /// A blank line came since the last experience line.
    after_blank: bool,
}

/// Runs the detector over every line of `text`.
pub fn detect_sections(text: &str) -> SectionRegistry {
    let mut detector = SectionDetector::new();
    for line in text.lines() {
        detector.feed(line);
    }
    detector.finish()
}

impl SectionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one line of input.
    pub fn feed(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        trace!(kind = ?classify_line(line), line, "Classified line");

        if let Some(header) = detect_section_header(line) {
            self.pending_banner = None;
            self.start_section(header, line);
            return;
        }
        if let Some(header) = detect_custom_header(line) {
            if self.current.is_none() {
                self.pending_banner = Some((header, line.to_string()));
            } else {
                self.start_section(header, line);
            }
            return;
        }

        if line.is_empty() {
            self.after_blank = true;
            // Paragraph breaks only matter inside prose sections.
            if let Some(DynamicSection {
                content: SectionContent::Text(text),
                ..
            }) = self.current.as_mut()
            {
                if !text.is_empty() && !text.ends_with("\n\n") {
                    text.push('\n');
                }
            }
            return;
        }

        if let Some((header, raw)) = self.pending_banner.take() {
            if is_bullet_point(line) {
                self.start_section(header, &raw);
            } else {
                debug!(banner = %raw, "Leading heading is a title banner, not a section");
            }
        }

        let section_type = match &self.current {
            Some(section) => section.section_type(),
            None => {
                debug!("Content before any header; opening implicit personal summary");
                self.current_name = PERSONAL_SUMMARY.to_string();
                self.current = Some(DynamicSection::new(SectionType::Text, ""));
                SectionType::Text
            }
        };

        match section_type {
            SectionType::Text => self.push_text_line(line),
            SectionType::Experience => self.push_experience_line(line),
            SectionType::Projects => self.push_project_line(line),
            SectionType::List => self.push_list_line(line),
        }
    }

    /// Flushes open entries, commits the last section and trims prose sections.
    pub fn finish(mut self) -> SectionRegistry {
        if let Some((header, raw)) = self.pending_banner.take() {
            self.start_section(header, &raw);
        }
        self.flush_entries();
        self.commit_current();
        for section in self.registry.values_mut() {
            if let SectionContent::Text(text) = &mut section.content {
                let trimmed_len = text.trim_end().len();
                text.truncate(trimmed_len);
            }
        }
        debug!(sections = self.registry.len(), "Section detection finished");
        self.registry
    }

    // ────────────────────────────────────────────────────────────────────────
    // Section transitions
    // ────────────────────────────────────────────────────────────────────────

    fn start_section(&mut self, header: HeaderMatch, raw_line: &str) {
        self.flush_entries();
        self.commit_current();
        debug!(
            section = %header.name,
            section_type = ?header.section_type,
            "Opening section"
        );
        self.current_name = header.name;
        self.current = Some(DynamicSection::new(header.section_type, raw_line));
        self.after_blank = false;
    }

    fn flush_entries(&mut self) {
        self.flush_experience();
        self.flush_project();
    }

    fn flush_experience(&mut self) {
        self.inherited_company = false;
        let Some(entry) = self.current_experience.take() else {
            return;
        };
        if entry.is_empty() {
            return;
        }
        if let Some(DynamicSection {
            content: SectionContent::Experience(entries),
            ..
        }) = self.current.as_mut()
        {
            debug!(company = %entry.company, title = %entry.title, "Flushed experience entry");
            entries.push(entry);
        }
    }

    fn flush_project(&mut self) {
        let Some(project) = self.current_project.take() else {
            return;
        };
        if project.is_empty() {
            return;
        }
        if let Some(DynamicSection {
            content: SectionContent::Projects(projects),
            ..
        }) = self.current.as_mut()
        {
            debug!(name = %project.name, "Flushed project entry");
            projects.push(project);
        }
    }

    /// Moves the open section into the registry. A repeated section name
    /// merges into the earlier entry when the shapes agree.
    fn commit_current(&mut self) {
        let Some(incoming) = self.current.take() else {
            return;
        };
        let name = std::mem::take(&mut self.current_name);
        debug!(section = %name, "Committing section");

        match self.registry.get_mut(&name) {
            Some(existing) => merge_section(existing, incoming),
            None => {
                self.registry.insert(name, incoming);
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Per-type line handling
    // ────────────────────────────────────────────────────────────────────────

    fn push_text_line(&mut self, line: &str) {
        // Photos, bold name banners and contact lines are not summary prose.
        if is_image(line) || line.starts_with("**") || line.contains('@') {
            return;
        }
        if let Some(DynamicSection {
            content: SectionContent::Text(text),
            ..
        }) = self.current.as_mut()
        {
            text.push_str(line);
            text.push('\n');
        }
    }

    fn push_experience_line(&mut self, line: &str) {
        if is_image(line) {
            return;
        }
        let after_blank = std::mem::take(&mut self.after_blank);

        if let Some(signal) = company_signal(line) {
            let inherited = self.inherited_company;
            match self.current_experience.as_mut() {
                None => {
                    self.open_experience_at(line);
                    return;
                }
                Some(open)
                    if open.accepts_company() || (inherited && open.bullets.is_empty()) =>
                {
                    let parsed = parse_company_line(line);
                    open.company = parsed.company;
                    if open.duration.is_empty() {
                        open.duration = parsed.duration.unwrap_or_default();
                    }
                    self.inherited_company = false;
                    return;
                }
                Some(open) => {
                    let looks_complete = !open.title.is_empty()
                        && (!open.duration.is_empty() || !open.bullets.is_empty());
                    if signal == CompanySignal::Strong || looks_complete {
                        self.flush_experience();
                        self.open_experience_at(line);
                        return;
                    }
                }
            }
        }

        if is_job_title(line) {
            let (title, glued) = split_trailing_duration(line);
            match self.current_experience.as_mut() {
                Some(open) if open.title.is_empty() => {
                    open.title = title;
                    if open.duration.is_empty() {
                        open.duration = glued.unwrap_or_default();
                    }
                }
                Some(open) if after_blank || !open.bullets.is_empty() => {
                    // Directly below the previous role: another role at the
                    // same employer. After a blank line: a new entry.
                    let company = if after_blank {
                        String::new()
                    } else {
                        open.company.clone()
                    };
                    self.flush_experience();
                    self.inherited_company = !company.is_empty();
                    self.current_experience = Some(WorkExperience {
                        company,
                        title,
                        duration: glued.unwrap_or_default(),
                        ..Default::default()
                    });
                }
                Some(open) => open.bullets.push(clean_markdown(line)),
                None => {
                    self.current_experience = Some(WorkExperience {
                        title,
                        duration: glued.unwrap_or_default(),
                        ..Default::default()
                    });
                }
            }
            return;
        }

        let entry = self
            .current_experience
            .get_or_insert_with(WorkExperience::default);

        if is_duration(line) {
            let duration = extract_duration(line).unwrap_or_else(|| clean_markdown(line));
            if entry.duration.is_empty() {
                entry.duration = duration;
            } else {
                entry.bullets.push(duration);
            }
            return;
        }

        if is_bullet_point(line) {
            let bullet = clean_bullet_point(line);
            if !bullet.is_empty() {
                entry.bullets.push(bullet);
            }
            return;
        }

        push_continuation(&mut entry.bullets, line);
    }

    fn open_experience_at(&mut self, line: &str) {
        let parsed = parse_company_line(line);
        self.current_experience = Some(WorkExperience {
            company: parsed.company,
            duration: parsed.duration.unwrap_or_default(),
            ..Default::default()
        });
    }

    fn push_project_line(&mut self, line: &str) {
        if is_image(line) {
            return;
        }
        if is_project_name(line) {
            self.flush_project();
            self.current_project = Some(Project {
                name: clean_markdown(line),
                ..Default::default()
            });
            return;
        }

        let project = self.current_project.get_or_insert_with(Project::default);
        if is_bullet_point(line) {
            let bullet = clean_bullet_point(line);
            if !bullet.is_empty() {
                project.bullets.push(bullet);
            }
            return;
        }

        let text = clean_markdown(line);
        if project.description.is_empty() {
            project.description = text;
        } else {
            project.description.push(' ');
            project.description.push_str(&text);
        }
    }

    fn push_list_line(&mut self, line: &str) {
        if is_image(line) {
            return;
        }
        let item = if is_bullet_point(line) {
            clean_bullet_point(line)
        } else {
            line.to_string()
        };
        if item.is_empty() {
            return;
        }
        if let Some(DynamicSection {
            content: SectionContent::List(items),
            ..
        }) = self.current.as_mut()
        {
            items.push(item);
        }
    }
}

/// Lowercase-initial lines continue a wrapped bullet; anything else becomes a
/// bullet of its own.
fn push_continuation(bullets: &mut Vec<String>, line: &str) {
    let text = clean_markdown(line);
    if text.is_empty() {
        return;
    }
    let continues = text.chars().next().is_some_and(char::is_lowercase);
    match bullets.last_mut() {
        Some(last) if continues => {
            last.push(' ');
            last.push_str(&text);
        }
        _ => bullets.push(text),
    }
}

fn merge_section(existing: &mut DynamicSection, incoming: DynamicSection) {
    if existing.content.is_empty() {
        *existing = incoming;
        return;
    }
    let DynamicSection {
        content,
        original_header,
    } = incoming;
    match (&mut existing.content, content) {
        (SectionContent::Text(text), SectionContent::Text(more)) => {
            if !more.trim().is_empty() {
                let trimmed_len = text.trim_end().len();
                text.truncate(trimmed_len);
                text.push_str("\n\n");
                text.push_str(&more);
            }
        }
        (SectionContent::List(items), SectionContent::List(more)) => items.extend(more),
        (SectionContent::Experience(entries), SectionContent::Experience(more)) => {
            entries.extend(more)
        }
        (SectionContent::Projects(projects), SectionContent::Projects(more)) => {
            projects.extend(more)
        }
        (current, replacement) => {
            *current = replacement;
            existing.original_header = original_header;
        }
    }
}
