//! Single-pass deterministic rewriting of a field toward a target score.
//!
//! The pass applies structural fixes in a fixed order and rescores once at
//! the end. A result that still misses the target is reported as such, not
//! retried.

use serde::Serialize;

use crate::rules;
use crate::scoring::field::{score_description, score_headline};
use crate::{any_match, char_len, is_all_caps, normalize_whitespace, round1};

pub const DEFAULT_TARGET_SCORE: f64 = 8.0;

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub original: String,
    pub optimized: String,
    pub initial_score: f64,
    pub final_score: f64,
    pub improvement: f64,
    pub improvements_applied: Vec<String>,
    pub changed: bool,
    pub meets_target: bool,
}

pub fn optimize_headline(
    headline: &str,
    keywords: Option<&[String]>,
    target_score: f64,
) -> OptimizationResult {
    let initial = score_headline(headline, keywords);
    if initial.score >= target_score {
        return unchanged(headline, initial.score);
    }

    let mut optimized = headline.to_string();
    let mut applied = Vec::new();

    if char_len(&optimized) > rules::HEADLINE_MAX {
        optimized = smart_truncate(&optimized, rules::HEADLINE_MAX);
        applied.push(format!(
            "Trimmed to the {} character limit",
            rules::HEADLINE_MAX
        ));
    }

    for ch in rules::FORBIDDEN_PUNCTUATION {
        if optimized.contains(ch) {
            optimized = optimized.replace(ch, "");
            applied.push(format!("Removed banned character: '{}'", ch));
        }
    }

    if is_all_caps(&optimized) {
        optimized = title_case(&optimized);
        applied.push("Fixed capitalization".to_string());
    }

    optimized = strip_forbidden_phrases(&optimized, &mut applied);

    if char_len(&optimized) < 25 && !any_match(&optimized.to_lowercase(), &rules::POWER_WORDS) {
        let with_filler = char_len(&optimized) + 1 + char_len(rules::HEADLINE_FILLER);
        if with_filler <= rules::HEADLINE_MAX {
            optimized = format!("{} {}", optimized, rules::HEADLINE_FILLER);
            applied.push(format!("Added power word: '{}'", rules::HEADLINE_FILLER));
        }
    }

    optimized = normalize_whitespace(&optimized);

    let final_score = score_headline(&optimized, keywords).score;
    finish(headline, optimized, initial.score, final_score, applied, target_score)
}

pub fn optimize_description(
    description: &str,
    keywords: Option<&[String]>,
    target_score: f64,
) -> OptimizationResult {
    let initial = score_description(description, keywords);
    if initial.score >= target_score {
        return unchanged(description, initial.score);
    }

    let mut optimized = description.to_string();
    let mut applied = Vec::new();

    if char_len(&optimized) > rules::DESCRIPTION_MAX {
        optimized = smart_truncate(&optimized, rules::DESCRIPTION_MAX);
        applied.push(format!(
            "Trimmed to the {} character limit",
            rules::DESCRIPTION_MAX
        ));
    }

    for ch in rules::FORBIDDEN_PUNCTUATION {
        if optimized.contains(ch) {
            optimized = optimized.replace(ch, ".");
            applied.push(format!("Replaced banned character '{}' with '.'", ch));
        }
    }

    if is_all_caps(&optimized) {
        optimized = sentence_case(&optimized);
        applied.push("Fixed capitalization".to_string());
    }

    optimized = strip_forbidden_phrases(&optimized, &mut applied);

    let has_cta = any_match(&optimized.to_lowercase(), &rules::ACTION_WORDS);
    if !has_cta && char_len(&optimized) < 75 {
        let with_filler = char_len(&optimized) + 1 + char_len(rules::DESCRIPTION_FILLER);
        if with_filler <= rules::DESCRIPTION_MAX {
            optimized = format!("{} {}", optimized, rules::DESCRIPTION_FILLER);
            applied.push(format!("Added CTA: '{}'", rules::DESCRIPTION_FILLER));
        }
    }

    optimized = normalize_whitespace(&optimized);

    let final_score = score_description(&optimized, keywords).score;
    finish(
        description,
        optimized,
        initial.score,
        final_score,
        applied,
        target_score,
    )
}

fn unchanged(text: &str, score: f64) -> OptimizationResult {
    OptimizationResult {
        original: text.to_string(),
        optimized: text.to_string(),
        initial_score: score,
        final_score: score,
        improvement: 0.0,
        improvements_applied: Vec::new(),
        changed: false,
        meets_target: true,
    }
}

fn finish(
    original: &str,
    optimized: String,
    initial_score: f64,
    final_score: f64,
    applied: Vec<String>,
    target_score: f64,
) -> OptimizationResult {
    OptimizationResult {
        changed: optimized != original,
        improvement: round1(final_score - initial_score),
        meets_target: final_score >= target_score,
        original: original.to_string(),
        optimized,
        initial_score,
        final_score,
        improvements_applied: applied,
    }
}

/// Cuts at the character limit, then backs up to the last space when that
/// space falls within the final 20% of the limit.
fn smart_truncate(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }
    let truncated = &chars[..max_len];
    let cut = match truncated.iter().rposition(|c| *c == ' ') {
        Some(idx) if idx as f64 > max_len as f64 * 0.8 => idx,
        _ => max_len,
    };
    truncated[..cut].iter().collect::<String>().trim().to_string()
}

/// Uppercases the first letter of each word and lowercases the rest.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases only the first character and lowercases everything after it.
fn sentence_case(text: &str) -> String {
    capitalize_word(text)
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Removes every occurrence of every banned phrase, case-insensitively,
/// collapsing the whitespace left behind.
fn strip_forbidden_phrases(text: &str, applied: &mut Vec<String>) -> String {
    let mut current = text.to_string();
    for phrase in rules::FORBIDDEN_PHRASES {
        let phrase_chars = phrase.chars().count();
        let mut removed = false;
        loop {
            let lower = current.to_lowercase();
            let Some(byte_start) = lower.find(phrase) else {
                break;
            };
            let char_start = lower[..byte_start].chars().count();
            let chars: Vec<char> = current.chars().collect();
            if char_start + phrase_chars > chars.len() {
                break;
            }
            let mut next: String = chars[..char_start].iter().collect();
            next.extend(chars[char_start + phrase_chars..].iter());
            current = next;
            removed = true;
        }
        if removed {
            current = normalize_whitespace(&current);
            applied.push(format!("Removed banned phrase: '{}'", phrase));
        }
    }
    current
}
