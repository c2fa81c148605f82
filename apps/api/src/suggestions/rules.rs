//! Deterministic rewrite rules behind the rule-based enhancer.
//!
//! No model call: weak openers become strong verbs, and the summary picks up
//! job-description keywords it does not mention yet.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Weak openers and the phrase that replaces them. Longer phrases come first
/// so `helped with` wins over `helped`.
const WEAK_OPENERS: &[(&str, &str)] = &[
    ("was responsible for", "Took ownership of"),
    ("responsible for", "Took ownership of"),
    ("was involved in", "Contributed to"),
    ("involved in", "Contributed to"),
    ("participated in", "Contributed to"),
    ("was tasked with", "Took ownership of"),
    ("tasked with", "Took ownership of"),
    ("in charge of", "Led"),
    ("worked on", "Developed"),
    ("worked with", "Partnered with"),
    ("helped with", "Collaborated on"),
    ("helped to", "Collaborated to"),
    ("helped", "Collaborated to"),
    ("assisted with", "Supported"),
    ("assisted in", "Contributed to"),
    ("assisted", "Supported"),
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "significantly",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "many",
    "numerous",
    "various",
    "several",
];

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "you", "your", "our", "ours", "will", "are", "this", "that",
    "these", "those", "from", "have", "has", "had", "their", "they", "them", "into", "about",
    "who", "what", "when", "where", "which", "while", "work", "working", "team", "teams",
    "role", "years", "year", "experience", "ability", "strong", "including", "across",
    "using", "within", "etc", "able", "must", "plus", "nice", "join", "looking", "we're",
    "all", "any", "can", "such", "also", "more", "other", "new", "well", "per", "via", "not",
    "but", "its", "it's", "was", "were", "been", "being", "would", "should", "could", "may",
    "help", "like", "how", "why", "need", "needs", "too", "us", "we", "get", "make", "own",
    "part", "both", "each", "some", "very", "than", "then", "there", "here", "out", "over",
    "under", "between",
    "skills", "knowledge", "understanding", "familiarity", "required", "preferred",
    "responsibilities", "requirements", "qualifications", "candidate", "company", "people",
    "opportunity", "environment", "apply", "benefits", "salary", "job", "position",
];

/// Tokens such as `Rust`, `C++`, `Node.js`, `CI/CD`.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+#./'-]*").unwrap());

/// `worked on the billing service` → `Developed the billing service`.
/// Returns the rewritten text and the opener that was replaced.
pub fn rewrite_weak_opener(text: &str) -> Option<(String, &'static str)> {
    let trimmed = text.trim_start();
    let lower = trimmed.to_lowercase();
    for &(weak, strong) in WEAK_OPENERS {
        let Some(rest) = lower.strip_prefix(weak) else {
            continue;
        };
        // Whole words only: `helpedX` is not `helped`.
        if rest.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            continue;
        }
        let Some(tail) = trimmed.get(weak.len()..).map(str::trim_start) else {
            continue;
        };
        if tail.is_empty() {
            return None;
        }
        return Some((format!("{strong} {tail}"), weak));
    }
    None
}

/// Digits, percentages and currency count as a measured outcome.
pub fn is_quantified(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

pub fn vague_scale_word(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    VAGUE_SCALE_WORDS.iter().copied().find(|word| {
        lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == *word)
    })
}

/// Most frequent non-stopword tokens of a job description, most frequent
/// first; ties keep first-seen order. Each keyword keeps its first spelling.
pub fn extract_keywords(job_description: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize, String)> = HashMap::new();
    for (position, m) in TOKEN_RE.find_iter(job_description).enumerate() {
        let token = m.as_str().trim_end_matches(['.', '\'', '-', '/']);
        let key = token.to_lowercase();
        let len = key.chars().count();
        if len < 2 || (len < 3 && !token.chars().all(char::is_uppercase)) {
            continue;
        }
        if STOPWORDS.contains(&key.as_str()) {
            continue;
        }
        counts
            .entry(key)
            .and_modify(|(count, _, _)| *count += 1)
            .or_insert((1, position, token.to_string()));
    }

    let mut ranked: Vec<_> = counts.into_values().collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, display)| display)
        .collect()
}

/// Whole-word, case-insensitive containment.
pub fn mentions(text: &str, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')' | '"'))
        .map(|token| token.trim_end_matches(['.', '!', '?']))
        .any(|token| token == keyword)
}

/// `a`, `a and b`, `a, b and c`.
pub fn join_natural(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
