use super::{ordered_sections, SectionBody};
use crate::models::resume::{Project, ResumeSection, WorkExperience};

/// Markdown in the shape the section detector reads back: `##` headings,
/// `**Company**`, `*Title* | Duration` and `- ` bullets.
pub fn render_markdown(resume: &ResumeSection) -> String {
    let mut blocks = Vec::new();
    for section in ordered_sections(resume) {
        let marker = if section.custom { "#" } else { "##" };
        let mut block = format!("{marker} {}\n", section.heading);
        match section.body {
            SectionBody::Text(text) => {
                block.push('\n');
                block.push_str(text.trim());
                block.push('\n');
            }
            SectionBody::List(items) => {
                block.push('\n');
                for item in items {
                    block.push_str(&format!("- {item}\n"));
                }
            }
            SectionBody::Experience(entries) => {
                for entry in entries {
                    block.push('\n');
                    push_experience(&mut block, entry);
                }
            }
            SectionBody::Projects(projects) => {
                for project in projects {
                    block.push('\n');
                    push_project(&mut block, project);
                }
            }
        }
        blocks.push(block);
    }
    blocks.join("\n")
}

fn push_experience(out: &mut String, entry: &WorkExperience) {
    if !entry.company.is_empty() {
        out.push_str(&format!("**{}**\n", entry.company));
    }
    match (entry.title.is_empty(), entry.duration.is_empty()) {
        (false, true) => out.push_str(&format!("*{}*\n", entry.title)),
        (false, false) => out.push_str(&format!("*{}* | {}\n", entry.title, entry.duration)),
        (true, false) => out.push_str(&format!("{}\n", entry.duration)),
        (true, true) => {}
    }
    for bullet in &entry.bullets {
        out.push_str(&format!("- {bullet}\n"));
    }
}

fn push_project(out: &mut String, project: &Project) {
    if !project.name.is_empty() {
        out.push_str(&format!("**{}**\n", project.name));
    }
    if !project.description.is_empty() {
        out.push_str(&format!("{}\n", project.description));
    }
    for bullet in &project.bullets {
        out.push_str(&format!("- {bullet}\n"));
    }
}
