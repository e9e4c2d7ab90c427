pub mod cache;
pub mod config;
pub mod optimizer;
pub mod predict;
pub mod rules;
pub mod scoring;
pub mod variation;
pub mod winner;

use serde::{Deserialize, Serialize};

/// Letter grade derived from a 1-10 quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Inclusive lower bounds at 9/8/7/6/5.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Grade::APlus
        } else if score >= 8.0 {
            Grade::A
        } else if score >= 7.0 {
            Grade::B
        } else if score >= 6.0 {
            Grade::C
        } else if score >= 5.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Which kind of ad field a piece of text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Headline,
    Description,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Headline => "headline",
            FieldKind::Description => "description",
        }
    }

    pub fn hard_limit(self) -> usize {
        match self {
            FieldKind::Headline => rules::HEADLINE_MAX,
            FieldKind::Description => rules::DESCRIPTION_MAX,
        }
    }
}

/// Metric details attached to a scored field; the shape depends on the
/// field kind, so each variant flattens to its own map on serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldMetrics {
    Headline(HeadlineMetrics),
    Description(DescriptionMetrics),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub power_words: usize,
    pub action_words: usize,
    pub has_numbers: bool,
    pub capitalization_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionMetrics {
    pub power_words: usize,
    pub emotional_words: usize,
    pub has_cta: bool,
    pub has_benefit: bool,
    pub has_punctuation: bool,
}

/// Result of scoring one headline or description. Created fresh on every
/// scoring call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredField {
    pub text: String,
    pub score: f64,
    pub grade: Grade,
    pub length: usize,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: FieldMetrics,
}

// --- shared text helpers --------------------------------------------------

/// Character count, not byte count; the ad channel limits are in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// True when the text has at least one letter and every letter is uppercase.
pub fn is_all_caps(text: &str) -> bool {
    let mut saw_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            saw_letter = true;
            if ch.is_lowercase() {
                return false;
            }
        }
    }
    saw_letter
}

/// Uppercase characters over all characters; 0.0 for empty text.
pub fn uppercase_ratio(text: &str) -> f64 {
    let total = char_len(text);
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}

pub fn contains_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Counts how many of `needles` appear as substrings of `haystack`.
/// `haystack` is expected to be lowercased already.
pub fn count_matches(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|word| haystack.contains(*word)).count()
}

pub fn any_match(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|word| haystack.contains(*word))
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// --- display helpers for the CLI ------------------------------------------

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
