//! Line classifier: stateless predicates over a single line of resume text.
//!
//! Every predicate is total: empty, unicode-only or Markdown-only input yields
//! `false` / `None`. The heuristics lean permissive; a misread line turns into a
//! stray bullet downstream, while a missed header would drop a whole section.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::headers::{self, camel_case_key, normalize_header, HeaderMatch};

// ────────────────────────────────────────────────────────────────────────────
// Date building blocks
// ────────────────────────────────────────────────────────────────────────────

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const YEAR: &str = r"(?:19|20)\d{2}";
const NUMERIC_DATE: &str = r"\d{1,2}/(?:\d{1,2}/)?(?:19|20)\d{2}";
const OPEN_END: &str = r"(?:present|current|now|ongoing|today)";
const RANGE_SEPARATOR: &str = r"(?:-|–|—|to|until)";

static DATE_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH}\s+{YEAR}\b|\b{NUMERIC_DATE}\b|\b{YEAR}\b"
    ))
    .unwrap()
});

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b{MONTH}\s+{YEAR}\b|\b{NUMERIC_DATE}\b")).unwrap()
});

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let point = format!(r"(?:\b{MONTH}\s+{YEAR}\b|\b{NUMERIC_DATE}\b|\b{YEAR}\b)");
    Regex::new(&format!(
        r"(?i){point}\s*{RANGE_SEPARATOR}\s*(?:{point}|\b{OPEN_END}\b)"
    ))
    .unwrap()
});

static OPEN_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b{OPEN_END}\b")).unwrap());

/// Title-Case text immediately followed by a month-year range, e.g. `Acme Corp Jan 2020 - Present`.
static TITLE_WITH_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^[A-Z][\w&.,'’-]*(?:\s+(?:[A-Z&][\w&.,'’-]*|of|and|the|for|at|de))*\s*(?:[|,–—-]\s*|\(\s*)?(?i:{MONTH}\s+{YEAR})\s*(?i:{RANGE_SEPARATOR})\s*(?i:{MONTH}\s+{YEAR}|{OPEN_END})"
    ))
    .unwrap()
});

// ────────────────────────────────────────────────────────────────────────────
// Markdown and bullet markers
// ────────────────────────────────────────────────────────────────────────────

static BULLET_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[•·▪◦‣●○■□➢➤►✓✔]\s*|[*+\-–—]\s+|\d{1,2}[.)]\s+|[a-z]\)\s+)").unwrap()
});

static BOLD_LEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*").unwrap());

static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\*[^*\s][^*]*\*|_[^_\s][^_]*_)$").unwrap());

static CUSTOM_H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(\S.*)$").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Keyword tables
// ────────────────────────────────────────────────────────────────────────────

static ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:engineer|developer|analyst|manager|director|associate|intern|researcher|specialist|consultant|architect|scientist|designer|administrator|coordinator|lead|officer|assistant|technician|programmer|president|founder)s?\b",
    )
    .unwrap()
});

static CORPORATE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:inc|corp|corporation|llc|llp|ltd|limited|company|co|gmbh|plc|university|institute|college|labs|technologies|group)\.?$",
    )
    .unwrap()
});

static STATE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*[A-Z]{2}$").unwrap());

static TAB_CITY_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\t+\s*[A-Z][A-Za-z .'-]*,\s*[A-Z]{2}\b").unwrap());

static TECH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:python|java|javascript|typescript|react|angular|vue|node(?:\.js)?|next\.js|django|flask|fastapi|spring|rails|docker|kubernetes|aws|gcp|azure|ml|ai|nlp|llm|tensorflow|pytorch|opencv|rust|golang|sql|postgresql|mongodb|redis|kafka|graphql|swift|kotlin|flutter)\b|c\+\+|c#|\.net\b)",
    )
    .unwrap()
});

static DOMAIN_NOUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:platform|model|system|tool|app|application|website|dashboard|engine|bot|chatbot|api|pipeline|framework|library|service|tracker|generator|simulator|analyzer|extension|plugin|game|clone)s?\b",
    )
    .unwrap()
});

static TRAILING_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^()]+\([^()]+\)$").unwrap());

const ACHIEVEMENT_VERBS: &[&str] = &[
    "developed",
    "implemented",
    "built",
    "created",
    "designed",
    "led",
    "managed",
    "optimized",
    "optimised",
    "enhanced",
    "delivered",
    "streamlined",
    "achieved",
    "improved",
    "increased",
    "reduced",
    "launched",
    "established",
    "automated",
    "architected",
    "engineered",
    "maintained",
    "migrated",
    "spearheaded",
    "drove",
    "owned",
    "mentored",
    "analyzed",
    "deployed",
    "integrated",
    "wrote",
    "conducted",
    "organized",
    "coordinated",
    "collaborated",
    "trained",
    "resolved",
    "supported",
    "contributed",
    "authored",
    "shipped",
    "scaled",
];

const TITLE_CASE_CONNECTORS: &[&str] = &[
    "of", "and", "the", "for", "in", "at", "to", "a", "an", "on", "with", "de", "&",
];

/// Words a date line may carry besides the dates themselves (`2 yrs 3 mos`).
const DURATION_UNITS: &[&str] = &["yr", "yrs", "year", "years", "mo", "mos", "month", "months"];

const SEASONS: &[&str] = &["spring", "summer", "fall", "autumn", "winter"];

const SEPARATOR_CHARS: &[char] = &['|', ',', '-', '–', '—', '(', '•', '·', '@', ':'];

// ────────────────────────────────────────────────────────────────────────────
// Tagged results
// ────────────────────────────────────────────────────────────────────────────

/// How confidently a line names an employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySignal {
    /// Bold text, corporate suffix, state suffix, tab + `City, ST`, or Title-Case + date range.
    Strong,
    /// ALL-CAPS or short Title-Case text without a role keyword.
    Weak,
}

/// Single best classification of a line, in detector precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Image,
    Header(HeaderMatch),
    Bullet,
    Duration,
    Company(CompanySignal),
    JobTitle,
    ProjectName,
    Prose,
}

/// An employer line split into its name and an embedded date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyLine {
    pub company: String,
    pub duration: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Cleaning
// ────────────────────────────────────────────────────────────────────────────

/// Removes `**`/`__`, leading `#` and wrapping `*`/`_` emphasis, then trims.
pub fn clean_markdown(line: &str) -> String {
    let text = line.replace("**", "").replace("__", "");
    let mut text = text.trim().trim_start_matches('#').trim();
    for marker in ['*', '_'] {
        if text.chars().count() > 1 {
            if let Some(inner) = text.strip_prefix(marker).and_then(|t| t.strip_suffix(marker)) {
                text = inner.trim();
            }
        }
    }
    text.to_string()
}

/// `clean_markdown` followed by removal of one leading bullet marker.
pub fn clean_bullet_point(line: &str) -> String {
    let text = clean_markdown(line);
    BULLET_MARKER_RE.replace(&text, "").trim().to_string()
}

fn strip_wrapping_parens(text: &str) -> &str {
    text.strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text)
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || SEPARATOR_CHARS.contains(&c))
}

// ────────────────────────────────────────────────────────────────────────────
// Shape helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn has_bullet_marker(line: &str) -> bool {
    BULLET_MARKER_RE.is_match(line.trim())
}

pub fn is_image(line: &str) -> bool {
    line.trim_start().starts_with("![")
}

fn is_all_caps(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn is_title_case(text: &str) -> bool {
    let mut saw_word = false;
    for (i, raw) in text.split_whitespace().enumerate() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '&');
        if word.is_empty() {
            continue;
        }
        if i > 0 && TITLE_CASE_CONNECTORS.contains(&word.to_lowercase().as_str()) {
            continue;
        }
        match word.chars().next() {
            Some(c) if c.is_uppercase() => saw_word = true,
            _ => return false,
        }
    }
    saw_word
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn starts_with_achievement_verb(text: &str) -> bool {
    let first = text
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase())
        .unwrap_or_default();
    ACHIEVEMENT_VERBS.contains(&first.as_str())
}

fn bold_lead(line: &str) -> Option<&str> {
    BOLD_LEAD_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Section headers
// ────────────────────────────────────────────────────────────────────────────

/// Whole-line match against the section synonym table. Prose that merely
/// contains a section word never matches.
pub fn detect_section_header(line: &str) -> Option<HeaderMatch> {
    headers::lookup(&normalize_header(line)).map(|row| HeaderMatch {
        name: row.name.to_string(),
        section_type: row.section_type,
    })
}

/// A single-`#` Markdown heading that names no known section opens a list
/// section keyed by the camelCased heading text.
pub fn detect_custom_header(line: &str) -> Option<HeaderMatch> {
    let caps = CUSTOM_H1_RE.captures(line.trim())?;
    let heading = clean_markdown(caps.get(1)?.as_str());
    if let Some(known) = detect_section_header(&heading) {
        return Some(known);
    }
    let key = camel_case_key(&heading);
    if key.is_empty() {
        return None;
    }
    if let Some(row) = headers::SECTION_SYNONYMS.iter().find(|row| row.name == key) {
        return Some(HeaderMatch {
            name: row.name.to_string(),
            section_type: row.section_type,
        });
    }
    Some(HeaderMatch {
        name: key,
        section_type: crate::models::resume::SectionType::List,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// True when the line contains any 4-digit year, month-year or numeric date.
pub fn is_date(line: &str) -> bool {
    DATE_POINT_RE.is_match(&clean_markdown(line))
}

/// True when the line is essentially a date or date range, optionally with a
/// short location (`San Francisco, CA | Jan 2020 - Present`).
pub fn is_duration(line: &str) -> bool {
    if has_bullet_marker(line) {
        return false;
    }
    let cleaned = clean_markdown(line);
    let text = strip_wrapping_parens(&cleaned);
    if !DATE_POINT_RE.is_match(text) {
        return false;
    }
    let has_range = DATE_RANGE_RE.is_match(text);
    let has_month_year = MONTH_YEAR_RE.is_match(text);

    let residue = DATE_RANGE_RE.replace_all(text, " ");
    let residue = DATE_POINT_RE.replace_all(&residue, " ");
    let residue = OPEN_END_RE.replace_all(&residue, " ");
    let leftover: Vec<String> = residue
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !DURATION_UNITS.contains(&w.as_str()))
        .collect();

    if leftover.is_empty() {
        return true;
    }
    let seasonal = leftover.len() == 1 && SEASONS.contains(&leftover[0].as_str());
    if !(has_range || has_month_year) {
        return seasonal;
    }
    let location_like = residue.contains(',')
        || leftover
            .iter()
            .any(|w| matches!(w.as_str(), "remote" | "hybrid" | "onsite"));
    seasonal || (location_like && leftover.len() <= 3 && !ROLE_RE.is_match(&residue))
}

/// First date range in the line, else first month-year, else first year.
pub fn extract_duration(line: &str) -> Option<String> {
    let text = clean_markdown(line);
    DATE_RANGE_RE
        .find(&text)
        .or_else(|| MONTH_YEAR_RE.find(&text))
        .or_else(|| DATE_POINT_RE.find(&text))
        .map(|m| m.as_str().trim().to_string())
}

/// Splits a date glued to the end of a line: `Engineer | 2020 - 2022` →
/// (`Engineer`, `2020 - 2022`). Returns the cleaned line unchanged when no
/// date closes it.
pub fn split_trailing_duration(line: &str) -> (String, Option<String>) {
    let text = clean_markdown(line);
    for re in [&*DATE_RANGE_RE, &*MONTH_YEAR_RE, &*DATE_POINT_RE] {
        if let Some(m) = re.find_iter(&text).last() {
            let tail = &text[m.end()..];
            if tail
                .chars()
                .all(|c| c.is_whitespace() || matches!(c, ')' | ']' | '.' | ','))
            {
                let head = clean_markdown(trim_separators(&text[..m.start()]));
                return (head, Some(m.as_str().trim().to_string()));
            }
        }
    }
    (text, None)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry-level predicates
// ────────────────────────────────────────────────────────────────────────────

/// Classifies how strongly a line looks like an employer or organisation name.
pub fn company_signal(line: &str) -> Option<CompanySignal> {
    let trimmed = line.trim();
    if trimmed.is_empty() || has_bullet_marker(trimmed) || is_image(trimmed) {
        return None;
    }
    if let Some(inner) = bold_lead(trimmed) {
        if !is_duration(inner) && !headers::is_known_header(inner) {
            return Some(CompanySignal::Strong);
        }
        return None;
    }
    // Italic lines are titles by convention.
    if ITALIC_RE.is_match(trimmed) {
        return None;
    }

    let text = clean_markdown(trimmed);
    if text.is_empty() || text.chars().count() > 100 || headers::is_known_header(&text) {
        return None;
    }
    if CORPORATE_SUFFIX_RE.is_match(&text) {
        return Some(CompanySignal::Strong);
    }
    let has_role = ROLE_RE.is_match(&text);
    if !has_role
        && (TITLE_WITH_RANGE_RE.is_match(&text)
            || TAB_CITY_STATE_RE.is_match(trimmed)
            || STATE_SUFFIX_RE.is_match(&text))
    {
        return Some(CompanySignal::Strong);
    }

    if has_role || is_duration(&text) || is_date(&text) {
        return None;
    }
    if is_all_caps(&text) {
        return Some(CompanySignal::Weak);
    }
    if is_title_case(&text) && word_count(&text) <= 5 && !text.ends_with('.') {
        return Some(CompanySignal::Weak);
    }
    None
}

pub fn is_company_name(line: &str) -> bool {
    company_signal(line).is_some()
}

/// Splits an employer line into the employer name and any embedded date range.
/// A bold lead wins; otherwise text before the first date, then before a tab.
pub fn parse_company_line(line: &str) -> CompanyLine {
    let trimmed = line.trim();
    if let Some(inner) = bold_lead(trimmed) {
        let rest = &trimmed[trimmed.find(inner).map_or(0, |i| i + inner.len())..];
        return CompanyLine {
            company: inner.to_string(),
            duration: extract_duration(rest),
        };
    }

    let text = clean_markdown(trimmed);
    let date = DATE_RANGE_RE
        .find(&text)
        .or_else(|| MONTH_YEAR_RE.find(&text));
    let (head, duration) = match date {
        Some(m) => (&text[..m.start()], Some(m.as_str().trim().to_string())),
        None => (text.as_str(), None),
    };
    let head = head.split('\t').next().unwrap_or(head);
    let company = trim_separators(head);
    CompanyLine {
        company: if company.is_empty() {
            trim_separators(&text).to_string()
        } else {
            company.to_string()
        },
        duration,
    }
}

/// Italic or H2 decoration, a role keyword, ALL-CAPS, or Title-Case only.
/// A trailing glued date is ignored; a bare date is never a title.
pub fn is_job_title(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || has_bullet_marker(trimmed) || is_image(trimmed) {
        return false;
    }
    if is_duration(trimmed) {
        return false;
    }
    if ITALIC_RE.is_match(trimmed) || (trimmed.starts_with("## ") && !trimmed.starts_with("###"))
    {
        return true;
    }
    let (head, _) = split_trailing_duration(trimmed);
    if head.is_empty() || word_count(&head) > 10 {
        return false;
    }
    ROLE_RE.is_match(&head) || is_all_caps(&head) || (is_title_case(&head) && word_count(&head) <= 8)
}

/// Explicit bullet marker, or a 10–200 character sentence that opens with an
/// achievement verb and is not an employer, title, project or date line.
pub fn is_bullet_point(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    if has_bullet_marker(trimmed) {
        return true;
    }
    let text = clean_markdown(trimmed);
    let len = text.chars().count();
    if !(10..=200).contains(&len) || !starts_with_achievement_verb(&text) {
        return false;
    }
    !(is_company_name(trimmed)
        || is_job_title(trimmed)
        || is_project_name(trimmed)
        || is_duration(trimmed))
}

/// Company-style heuristics, or a technology keyword, a domain noun, or a
/// trailing `(Tech1, Tech2)` list on a short line.
pub fn is_project_name(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || has_bullet_marker(trimmed) || is_image(trimmed) {
        return false;
    }
    if let Some(inner) = bold_lead(trimmed) {
        return !is_duration(inner) && !headers::is_known_header(inner);
    }

    let text = clean_markdown(trimmed);
    if text.is_empty()
        || text.chars().count() > 100
        || text.ends_with('.')
        || word_count(&text) > 12
        || is_duration(&text)
        || starts_with_achievement_verb(&text)
        || headers::is_known_header(&text)
    {
        return false;
    }
    if TRAILING_PAREN_RE.is_match(&text) {
        return true;
    }
    let starts_with_article = text
        .split_whitespace()
        .next()
        .is_some_and(|w| matches!(w.to_lowercase().as_str(), "a" | "an" | "the"));
    if !starts_with_article
        && word_count(&text) <= 8
        && (TECH_RE.is_match(&text) || DOMAIN_NOUN_RE.is_match(&text))
    {
        return true;
    }
    is_all_caps(&text) || (is_title_case(&text) && word_count(&text) <= 6)
}

/// One tagged classification per line, in the precedence the detector uses.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if is_image(trimmed) {
        return LineKind::Image;
    }
    if let Some(header) = detect_section_header(trimmed).or_else(|| detect_custom_header(trimmed)) {
        return LineKind::Header(header);
    }
    if has_bullet_marker(trimmed) {
        return LineKind::Bullet;
    }
    if is_duration(trimmed) {
        return LineKind::Duration;
    }
    if let Some(signal) = company_signal(trimmed) {
        return LineKind::Company(signal);
    }
    if is_job_title(trimmed) {
        return LineKind::JobTitle;
    }
    if is_project_name(trimmed) {
        return LineKind::ProjectName;
    }
    if is_bullet_point(trimmed) {
        return LineKind::Bullet;
    }
    LineKind::Prose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionType;

    const PATHOLOGICAL: &[&str] = &[
        "", " ", "\t", "**", "****", "*", "#", "##", "![](x.png)", "•", "- ", "()", "[]",
        "日本語のテキスト", "🚀🚀🚀", "((((", "2020", "—", "\u{feff}",
    ];

    #[test]
    fn test_predicates_are_total_on_pathological_input() {
        for line in PATHOLOGICAL {
            let _ = detect_section_header(line);
            let _ = detect_custom_header(line);
            let _ = is_company_name(line);
            let _ = is_job_title(line);
            let _ = is_duration(line);
            let _ = is_date(line);
            let _ = is_bullet_point(line);
            let _ = is_project_name(line);
            let _ = clean_markdown(line);
            let _ = clean_bullet_point(line);
            let _ = split_trailing_duration(line);
            let _ = parse_company_line(line);
            let _ = classify_line(line);
        }
    }

    #[test]
    fn test_empty_line_is_nothing() {
        assert!(detect_section_header("").is_none());
        assert!(!is_company_name(""));
        assert!(!is_job_title(""));
        assert!(!is_duration(""));
        assert!(!is_bullet_point(""));
        assert!(!is_project_name(""));
        assert_eq!(classify_line("   "), LineKind::Blank);
    }

    // ── headers ──

    #[test]
    fn test_detect_work_experience_header() {
        assert_eq!(
            detect_section_header("Work Experience"),
            Some(HeaderMatch {
                name: "workExperience".to_string(),
                section_type: SectionType::Experience,
            })
        );
    }

    #[test]
    fn test_detect_decorated_projects_header() {
        assert_eq!(
            detect_section_header("## **Projects**"),
            Some(HeaderMatch {
                name: "projects".to_string(),
                section_type: SectionType::Projects,
            })
        );
    }

    #[test]
    fn test_prose_containing_keyword_is_not_header() {
        assert!(detect_section_header("I have experience in distributed systems").is_none());
        assert!(detect_section_header("Skills gained at Acme").is_none());
    }

    #[test]
    fn test_header_matching_is_case_insensitive() {
        let m = detect_section_header("TECHNICAL SKILLS:").unwrap();
        assert_eq!(m.name, "skills");
        assert_eq!(m.section_type, SectionType::List);
        assert_eq!(detect_section_header("Executive Summary").unwrap().name, "personalSummary");
    }

    #[test]
    fn test_custom_h1_header() {
        let m = detect_custom_header("# Volunteer Work").unwrap();
        assert_eq!(m.name, "volunteerWork");
        assert_eq!(m.section_type, SectionType::List);
        assert_eq!(detect_custom_header("# Education").unwrap().name, "education");
        assert!(detect_custom_header("## Volunteer Work").is_none());
        assert!(detect_custom_header("Volunteer Work").is_none());
    }

    // ── cleaning ──

    #[test]
    fn test_clean_markdown() {
        assert_eq!(clean_markdown("**Acme Inc**"), "Acme Inc");
        assert_eq!(clean_markdown("## Summary"), "Summary");
        assert_eq!(clean_markdown("*Software Engineer*"), "Software Engineer");
        assert_eq!(clean_markdown("  plain  "), "plain");
    }

    #[test]
    fn test_clean_bullet_point() {
        assert_eq!(clean_bullet_point("• Built X"), "Built X");
        assert_eq!(clean_bullet_point("- Shipped Y"), "Shipped Y");
        assert_eq!(clean_bullet_point("* **Led** the team"), "Led the team");
        assert_eq!(clean_bullet_point("3. Third item"), "Third item");
        assert_eq!(clean_bullet_point("b) second"), "second");
        assert_eq!(clean_bullet_point("No marker here"), "No marker here");
    }

    // ── dates ──

    #[test]
    fn test_is_duration_ranges() {
        assert!(is_duration("Jan 2020 - Present"));
        assert!(is_duration("2019 - 2021"));
        assert!(is_duration("2018–Present"));
        assert!(is_duration("(March 2017 to June 2019)"));
        assert!(is_duration("05/2019 - 08/2021"));
        assert!(is_duration("San Francisco, CA | Jan 2020 - Present"));
        assert!(is_duration("2020"));
        assert!(is_duration("01/15/2020"));
        assert!(is_duration("Jan 2020 - Present · 2 yrs 3 mos"));
        assert!(is_duration("Summer 2021"));
        assert!(is_duration("Remote | Mar 2021 - Present"));
    }

    #[test]
    fn test_is_duration_rejects_named_lines_with_dates() {
        assert!(!is_duration("Backend Developer | 2019 - 2021"));
        assert!(!is_duration("Acme | 2019 - 2021"));
        assert!(!is_duration("Acme 2020"));
    }

    #[test]
    fn test_is_duration_rejects_prose_with_year() {
        assert!(!is_duration("Migrated billing stack to Rust in 2020"));
        assert!(!is_duration("• Jan 2020 - Present"));
        assert!(!is_duration("Software Engineer"));
    }

    #[test]
    fn test_is_date() {
        assert!(is_date("Graduated May 2019"));
        assert!(is_date("12/01/2020"));
        assert!(!is_date("Acme Inc"));
        assert!(!is_date("Built 12000 widgets"));
    }

    #[test]
    fn test_extract_duration() {
        assert_eq!(
            extract_duration("Acme | Jan 2020 - Present | Remote").as_deref(),
            Some("Jan 2020 - Present")
        );
        assert_eq!(extract_duration("Graduated 2019").as_deref(), Some("2019"));
        assert_eq!(extract_duration("no dates"), None);
    }

    #[test]
    fn test_split_trailing_duration() {
        assert_eq!(
            split_trailing_duration("Software Engineer | Jan 2020 - Present"),
            ("Software Engineer".to_string(), Some("Jan 2020 - Present".to_string()))
        );
        assert_eq!(
            split_trailing_duration("Data Analyst (2018 - 2020)"),
            ("Data Analyst".to_string(), Some("2018 - 2020".to_string()))
        );
        assert_eq!(
            split_trailing_duration("*Staff Engineer* | 2021 - Present"),
            ("Staff Engineer".to_string(), Some("2021 - Present".to_string()))
        );
        assert_eq!(
            split_trailing_duration("Product Manager"),
            ("Product Manager".to_string(), None)
        );
    }

    // ── companies ──

    #[test]
    fn test_bold_company_is_strong() {
        assert_eq!(company_signal("**Acme Inc**"), Some(CompanySignal::Strong));
        assert_eq!(company_signal("**Acme** | 2019 - 2021"), Some(CompanySignal::Strong));
    }

    #[test]
    fn test_bold_date_is_not_company() {
        assert_eq!(company_signal("**Jan 2020 - Present**"), None);
    }

    #[test]
    fn test_plain_company_signals() {
        assert_eq!(company_signal("Globex Corporation"), Some(CompanySignal::Strong));
        assert_eq!(company_signal("Stanford University"), Some(CompanySignal::Strong));
        assert_eq!(company_signal("Initech, TX"), Some(CompanySignal::Strong));
        assert_eq!(
            company_signal("Initech\tAustin, TX"),
            Some(CompanySignal::Strong)
        );
        assert_eq!(
            company_signal("Hooli Jan 2019 - Present"),
            Some(CompanySignal::Strong)
        );
        assert_eq!(company_signal("GOOGLE"), Some(CompanySignal::Weak));
        assert_eq!(company_signal("Pied Piper"), Some(CompanySignal::Weak));
    }

    #[test]
    fn test_role_lines_are_not_companies() {
        assert_eq!(company_signal("Software Engineer"), None);
        assert_eq!(company_signal("SENIOR DATA ANALYST"), None);
        assert_eq!(company_signal("Senior Engineer Jan 2019 - Present"), None);
        assert_eq!(company_signal("*Title A*"), None);
    }

    #[test]
    fn test_section_header_text_is_not_company() {
        assert_eq!(company_signal("EXPERIENCE"), None);
        assert_eq!(company_signal("**Skills**"), None);
    }

    #[test]
    fn test_parse_company_line() {
        assert_eq!(
            parse_company_line("**Acme Inc** | Jan 2020 - Present"),
            CompanyLine {
                company: "Acme Inc".to_string(),
                duration: Some("Jan 2020 - Present".to_string()),
            }
        );
        assert_eq!(
            parse_company_line("Hooli, Palo Alto Jan 2019 - Dec 2021"),
            CompanyLine {
                company: "Hooli, Palo Alto".to_string(),
                duration: Some("Jan 2019 - Dec 2021".to_string()),
            }
        );
        assert_eq!(
            parse_company_line("Initech\tAustin, TX"),
            CompanyLine {
                company: "Initech".to_string(),
                duration: None,
            }
        );
    }

    // ── titles ──

    #[test]
    fn test_is_job_title() {
        assert!(is_job_title("Software Engineer"));
        assert!(is_job_title("*Head of Growth*"));
        assert!(is_job_title("## Staff Platform Lead"));
        assert!(is_job_title("VP OF SALES"));
        assert!(is_job_title("Title A"));
        assert!(is_job_title("Backend Developer | 2019 - 2021"));
    }

    #[test]
    fn test_is_job_title_rejects_dates_and_prose() {
        assert!(!is_job_title("Jan 2020 - Present"));
        assert!(!is_job_title("• Built the thing"));
        assert!(!is_job_title("built a caching layer that reduced p99 latency"));
    }

    // ── bullets ──

    #[test]
    fn test_marker_bullets() {
        assert!(is_bullet_point("• Built X"));
        assert!(is_bullet_point("- Shipped Y"));
        assert!(is_bullet_point("* Fixed Z"));
        assert!(is_bullet_point("1. First"));
        assert!(is_bullet_point("a) lettered"));
        assert!(is_bullet_point("•No space after marker"));
    }

    #[test]
    fn test_bold_is_not_bullet() {
        assert!(!is_bullet_point("**Acme Inc**"));
    }

    #[test]
    fn test_achievement_verb_fallback() {
        assert!(is_bullet_point(
            "Developed a caching layer that reduced latency by 40%"
        ));
        assert!(is_bullet_point("Implemented CI pipelines for all services"));
        assert!(!is_bullet_point("Led"));
        assert!(!is_bullet_point("Shipped"));
        assert!(!is_bullet_point("Our team developed things"));
    }

    // ── projects ──

    #[test]
    fn test_is_project_name() {
        assert!(is_project_name("**Habit Tracker**"));
        assert!(is_project_name("Resume Parser (Rust, Axum)"));
        assert!(is_project_name("Personal finance dashboard"));
        assert!(is_project_name("Chess engine in Python"));
        assert!(is_project_name("PORTFOLIO SITE"));
    }

    #[test]
    fn test_descriptions_are_not_project_names() {
        assert!(!is_project_name("A platform for tracking habits across devices."));
        assert!(!is_project_name("Built a recommendation system using Python"));
        assert!(!is_project_name("• Added OAuth login"));
    }

    // ── classify ──

    #[test]
    fn test_classify_line_precedence() {
        assert!(matches!(classify_line("Skills"), LineKind::Header(_)));
        assert_eq!(classify_line("![logo](logo.png)"), LineKind::Image);
        assert_eq!(classify_line("• Built X"), LineKind::Bullet);
        assert_eq!(classify_line("Jan 2020 - Present"), LineKind::Duration);
        assert_eq!(classify_line("**Acme**"), LineKind::Company(CompanySignal::Strong));
        assert_eq!(classify_line("Software Engineer"), LineKind::JobTitle);
        assert_eq!(
            classify_line("Developed a caching layer that reduced latency"),
            LineKind::Bullet
        );
        assert_eq!(
            classify_line("i like writing software in my spare time"),
            LineKind::Prose
        );
    }
}
