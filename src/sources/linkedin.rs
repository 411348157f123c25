//! Best-effort extraction of a LinkedIn "Save to PDF" export.
//!
//! Nothing here returns an error: a heading that is missing or a field that
//! does not match leaves the corresponding value empty or `None`.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{BasicInfo, EducationEntry, ExperienceEntry, LinkedInProfile};

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Location\s*([^\n]+)").unwrap());

static EXPERIENCE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Experience\s*").unwrap());
static EXPERIENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Education|Skills").unwrap());

static EDUCATION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Education\s*").unwrap());
static EDUCATION_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Experience|Skills").unwrap());

static SKILLS_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Skills\s*").unwrap());
static SKILLS_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Languages|Interests").unwrap());

/// A line that opens a new role: `Company · Title`.
static ROLE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][^\n·]* · ").unwrap());
static ROLE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n]+?) · ([^\n]+)").unwrap());

static MONTH_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:{m})\s+\d{{4}}\s*-\s*(?:Present|(?:{m})\s+\d{{4}})",
        m = MONTHS
    ))
    .unwrap()
});

/// The date line of a role, through the end of that line.
static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?s)(?:{})\s+\d{{4}}.+?\n", MONTHS)).unwrap());

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Bachelor|Master|PhD|BSc|MSc|MBA|MD|JD)[^\n·]*").unwrap()
});

static YEAR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}\s*-\s*(?:\d{4}|Present)").unwrap());

static SKILL_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[•\n]").unwrap());

pub fn extract_profile(text: &str) -> LinkedInProfile {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    LinkedInProfile {
        basic_info: extract_basic_info(&text),
        experience: extract_experience(&text),
        education: extract_education(&text),
        skills: extract_skills(&text),
    }
}

pub fn extract_basic_info(text: &str) -> BasicInfo {
    let mut lines = text.split('\n');

    let name = lines.next().and_then(non_empty);
    let headline = if name.is_some() {
        lines.next().and_then(non_empty)
    } else {
        None
    };

    let location = LOCATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()));

    BasicInfo {
        name,
        headline,
        location,
    }
}

pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(section) = section_span(text, &EXPERIENCE_HEADING_RE, &EXPERIENCE_END_RE) else {
        return Vec::new();
    };

    split_before(section, |line| ROLE_START_RE.is_match(line))
        .into_iter()
        .map(|role| parse_role(&role))
        .filter(|entry| *entry != ExperienceEntry::default())
        .collect()
}

fn parse_role(role: &str) -> ExperienceEntry {
    let mut entry = ExperienceEntry::default();

    if let Some(caps) = ROLE_HEADER_RE.captures(role) {
        entry.company = caps.get(1).and_then(|m| non_empty(m.as_str()));
        entry.title = caps.get(2).and_then(|m| non_empty(m.as_str()));
    }

    entry.date_range = MONTH_RANGE_RE
        .find(role)
        .and_then(|m| non_empty(m.as_str()));

    if let Some(date_line) = DATE_LINE_RE.find(role) {
        let rest = &role[date_line.end()..];
        let end = rest.find("\n\n").unwrap_or(rest.len());
        entry.description = non_empty(&rest[..end]);
    }

    entry
}

pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let Some(section) = section_span(text, &EDUCATION_HEADING_RE, &EDUCATION_END_RE) else {
        return Vec::new();
    };

    // A school line starts with a letter; degree lines belong to the school above.
    split_before(section, |line| {
        line.starts_with(|c: char| c.is_ascii_alphabetic()) && !DEGREE_RE.is_match(line)
    })
    .into_iter()
    .map(|entry| parse_education_entry(&entry))
    .filter(|entry| *entry != EducationEntry::default())
    .collect()
}

fn parse_education_entry(entry: &str) -> EducationEntry {
    let school = entry
        .split('\n')
        .find(|line| !line.trim().is_empty())
        .filter(|line| !DEGREE_RE.is_match(line))
        .and_then(non_empty);

    EducationEntry {
        school,
        degree: DEGREE_RE.find(entry).and_then(|m| non_empty(m.as_str())),
        date_range: YEAR_RANGE_RE.find(entry).and_then(|m| non_empty(m.as_str())),
    }
}

pub fn extract_skills(text: &str) -> Vec<String> {
    let Some(section) = section_span(text, &SKILLS_HEADING_RE, &SKILLS_END_RE) else {
        return Vec::new();
    };

    SKILL_SEPARATOR_RE
        .split(section)
        .filter_map(non_empty)
        .collect()
}

/// Text after the first `heading` match up to the first `end` match, or to
/// the end of the text. The span holds at least one character.
fn section_span<'a>(text: &'a str, heading: &Regex, end: &Regex) -> Option<&'a str> {
    let start = heading.find(text)?.end();
    let body = &text[start..];
    let first_len = body.chars().next()?.len_utf8();
    let stop = end
        .find_at(body, first_len)
        .map(|m| m.start())
        .unwrap_or(body.len());
    Some(&body[..stop])
}

/// Splits `text` into chunks, starting a new chunk at every line (after the
/// first) for which `starts_chunk` holds. Blank chunks are dropped.
fn split_before<F>(text: &str, starts_chunk: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 && starts_chunk(line) {
            chunks.push(Vec::new());
        }
        if let Some(current) = chunks.last_mut() {
            current.push(line);
        }
    }

    chunks
        .into_iter()
        .map(|lines| lines.join("\n"))
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
