//! One lexical rule per output field.
//!
//! Each rule scans the whole text once and returns `Some(value)` only when
//! it matched something non-empty. Rules never look at each other's output.
//!
//! Numbers are ASCII digits only (`[0-9]`, never the Unicode-aware `\d`).

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction pattern must compile")
}

static ESTABLISHED: Lazy<Regex> = Lazy::new(|| re(r"(?i)established in ([0-9]{4})"));
static LOCATION: Lazy<Regex> = Lazy::new(|| re(r"(?i)located in ([^.,]+)"));
static DEPARTMENT: Lazy<Regex> = Lazy::new(|| re(r"(?i)departments? of ([^.,]+)"));
static STUDENTS: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+)\s*(?:students|enrolled)"));
static FACULTY: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+)\s*(?:faculty|teachers|professors)"));
static CAMPUS_AREA: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)[0-9]+\s*(?:acres|hectares|sq\.?\s*ft\.?)"));
static LABS: Lazy<Regex> = Lazy::new(|| re(r"(?i)laborator(?:y|ies)[^.,]+"));
static LIBRARY: Lazy<Regex> = Lazy::new(|| re(r"(?i)library[^.,]+"));
static NAAC: Lazy<Regex> = Lazy::new(|| re(r"(?i)naac[^.,]+"));
static NBA: Lazy<Regex> = Lazy::new(|| re(r"(?i)nba[^.,]+"));
static RANKING: Lazy<Regex> = Lazy::new(|| re(r"(?i)rank(?:ed|ing)[^.,]+"));
static PLACEMENT: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+)%\s*(?:placement|placed)"));
static PACKAGE: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(?:lpa|lakh|package)"));
static COMPANIES: Lazy<Regex> = Lazy::new(|| re(r"(?i)companies?[^.,]+"));
static RESEARCH: Lazy<Regex> = Lazy::new(|| re(r"(?i)research[^.,]+"));
static PUBLICATIONS: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+)\s*(?:publications|papers)"));
static PATENTS: Lazy<Regex> = Lazy::new(|| re(r"(?i)([0-9]+)\s*(?:patents|patented)"));
static SPORTS: Lazy<Regex> = Lazy::new(|| re(r"(?i)sports[^.,]+"));
static HOSTEL: Lazy<Regex> = Lazy::new(|| re(r"(?i)hostel[^.,]+"));
static TRANSPORT: Lazy<Regex> = Lazy::new(|| re(r"(?i)transport[^.,]+"));

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// First match of capture group `group`.
fn first_group(pattern: &Regex, text: &str, group: usize) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().to_string())
        .and_then(non_empty)
}

/// First match, whole span.
fn first_span(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .and_then(non_empty)
}

/// Every match, whole span, joined with `", "`.
fn all_spans(pattern: &Regex, text: &str) -> Option<String> {
    non_empty(pattern.find_iter(text).map(|m| m.as_str()).join(", "))
}

pub fn established(text: &str) -> Option<String> {
    first_group(&ESTABLISHED, text, 1)
}

pub fn location(text: &str) -> Option<String> {
    first_group(&LOCATION, text, 1).map(|s| s.trim().to_string())
}

/// Priority is government, then private, then autonomous.
pub fn institution_type(text: &str) -> Option<String> {
    let text = text.to_lowercase();
    [
        ("government", "Government"),
        ("private", "Private"),
        ("autonomous", "Autonomous"),
    ]
    .iter()
    .find(|(needle, _)| text.contains(needle))
    .map(|(_, label)| label.to_string())
}

pub fn departments(text: &str) -> Option<String> {
    non_empty(
        DEPARTMENT
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .join(", "),
    )
}

pub fn student_strength(text: &str) -> Option<String> {
    first_group(&STUDENTS, text, 1)
}

pub fn faculty_count(text: &str) -> Option<String> {
    first_group(&FACULTY, text, 1)
}

pub fn campus_area(text: &str) -> Option<String> {
    first_span(&CAMPUS_AREA, text)
}

pub fn labs(text: &str) -> Option<String> {
    all_spans(&LABS, text)
}

pub fn library(text: &str) -> Option<String> {
    first_span(&LIBRARY, text)
}

pub fn naac(text: &str) -> Option<String> {
    first_span(&NAAC, text)
}

pub fn nba(text: &str) -> Option<String> {
    first_span(&NBA, text)
}

pub fn rankings(text: &str) -> Option<String> {
    first_span(&RANKING, text)
}

pub fn placement_percentage(text: &str) -> Option<String> {
    first_group(&PLACEMENT, text, 1).map(|n| format!("{n}%"))
}

pub fn average_package(text: &str) -> Option<String> {
    first_group(&PACKAGE, text, 1).map(|n| format!("{n} LPA"))
}

pub fn top_companies(text: &str) -> Option<String> {
    all_spans(&COMPANIES, text)
}

pub fn research_centers(text: &str) -> Option<String> {
    first_span(&RESEARCH, text)
}

pub fn publications(text: &str) -> Option<String> {
    first_group(&PUBLICATIONS, text, 1)
}

pub fn patents(text: &str) -> Option<String> {
    first_group(&PATENTS, text, 1)
}

pub fn sports_facilities(text: &str) -> Option<String> {
    first_span(&SPORTS, text)
}

pub fn hostel_facilities(text: &str) -> Option<String> {
    first_span(&HOSTEL, text)
}

pub fn transport_facilities(text: &str) -> Option<String> {
    first_span(&TRANSPORT, text)
}
