//! Rule-based quality scoring for a single ad field.
//!
//! Both scorers are pure functions: same text and keywords in, bit-identical
//! result out. Every rule starts from 10.0 and applies penalties and capped
//! bonuses, then clamps to [1.0, 10.0].

use crate::rules;
use crate::{
    any_match, char_len, contains_digit, count_matches, is_all_caps, round1, uppercase_ratio,
    DescriptionMetrics, FieldMetrics, Grade, HeadlineMetrics, ScoredField,
};

/// Scores a headline against the 30-character rule set.
pub fn score_headline(headline: &str, keywords: Option<&[String]>) -> ScoredField {
    let mut score = 10.0;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();
    let mut recommendations = Vec::new();

    let length = char_len(headline);
    if length > rules::HEADLINE_MAX {
        score -= 3.0;
        issues.push(format!(
            "Exceeds the {} character limit ({} chars)",
            rules::HEADLINE_MAX,
            length
        ));
    } else if length > rules::HEADLINE_NEAR_LIMIT {
        score -= 1.0;
        issues.push(format!(
            "Close to the limit ({}/{} chars)",
            length,
            rules::HEADLINE_MAX
        ));
    } else if length < rules::HEADLINE_MIN {
        score -= 1.5;
        issues.push(format!(
            "Too short, could be more descriptive ({} chars)",
            length
        ));
    } else {
        strengths.push(format!("Optimal length ({} chars)", length));
    }

    let capitalization_ratio = uppercase_ratio(headline);
    if is_all_caps(headline) {
        score -= 2.0;
        issues.push("Written entirely in capitals (not allowed)".to_string());
    } else if capitalization_ratio > 0.5 {
        score -= 1.0;
        issues.push("Too many capital letters".to_string());
    }

    // Only the first banned character found is penalized.
    for ch in rules::FORBIDDEN_PUNCTUATION {
        if headline.contains(ch) {
            score -= 1.0;
            issues.push(format!("Contains banned character: '{}'", ch));
            break;
        }
    }

    let lower = headline.to_lowercase();
    for phrase in rules::FORBIDDEN_PHRASES {
        if lower.contains(phrase) {
            score -= 2.5;
            issues.push(format!("Contains banned phrase: '{}'", phrase));
        }
    }

    let power_words = count_matches(&lower, &rules::POWER_WORDS);
    if power_words > 0 {
        score += (power_words as f64 * 0.5).min(1.5);
        strengths.push(format!("Contains {} power word(s)", power_words));
    }

    let action_words = count_matches(&lower, &rules::ACTION_WORDS);
    if action_words > 0 {
        score += (action_words as f64 * 0.3).min(1.0);
        strengths.push(format!("Contains {} action word(s)", action_words));
    }

    if let Some(keywords) = keywords {
        if !keywords.is_empty() {
            let matches = keywords
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .count();
            if matches > 0 {
                score += (matches as f64 * 0.5).min(1.5);
                strengths.push(format!("Includes {} relevant keyword(s)", matches));
            } else {
                score -= 0.5;
                recommendations.push("Consider working a target keyword in".to_string());
            }
        }
    }

    let has_numbers = contains_digit(headline);
    if has_numbers {
        score += 0.3;
        strengths.push("Includes numbers (builds trust)".to_string());
    }

    let repeated = repeated_words(&lower);
    if !repeated.is_empty() {
        score -= 0.5;
        issues.push(format!("Repeated words: {}", repeated.join(", ")));
    }

    let score = round1(score.clamp(1.0, 10.0));

    if recommendations.is_empty() {
        if score < 7.0 {
            recommendations.push("Review the flagged issues and rework the headline".to_string());
        }
        if length > 25 {
            recommendations.push("Consider shortening for better mobile visibility".to_string());
        }
        if power_words == 0 {
            recommendations
                .push("Add impact words: garantizado, efectivo, profesional".to_string());
        }
    }

    ScoredField {
        text: headline.to_string(),
        score,
        grade: Grade::from_score(score),
        length,
        issues,
        strengths,
        recommendations,
        metrics: FieldMetrics::Headline(HeadlineMetrics {
            power_words,
            action_words,
            has_numbers,
            capitalization_ratio,
        }),
    }
}

/// Scores a description against the 90-character rule set.
pub fn score_description(description: &str, keywords: Option<&[String]>) -> ScoredField {
    let mut score = 10.0;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();
    let mut recommendations = Vec::new();

    let length = char_len(description);
    if length > rules::DESCRIPTION_MAX {
        score -= 3.0;
        issues.push(format!(
            "Exceeds the {} character limit ({} chars)",
            rules::DESCRIPTION_MAX,
            length
        ));
    } else if length > rules::DESCRIPTION_NEAR_LIMIT {
        score -= 1.0;
        issues.push(format!(
            "Close to the limit ({}/{} chars)",
            length,
            rules::DESCRIPTION_MAX
        ));
    } else if length < rules::DESCRIPTION_MIN {
        score -= 1.5;
        issues.push(format!("Too short, add more detail ({} chars)", length));
    } else {
        strengths.push(format!("Optimal length ({} chars)", length));
    }

    if is_all_caps(description) {
        score -= 2.0;
        issues.push("Written entirely in capitals (not allowed)".to_string());
    }

    for ch in rules::FORBIDDEN_PUNCTUATION {
        if description.contains(ch) {
            score -= 0.8;
            issues.push(format!("Contains banned character: '{}'", ch));
            break;
        }
    }

    let lower = description.to_lowercase();
    for phrase in rules::FORBIDDEN_PHRASES {
        if lower.contains(phrase) {
            score -= 2.5;
            issues.push(format!("Contains banned phrase: '{}'", phrase));
        }
    }

    let power_words = count_matches(&lower, &rules::POWER_WORDS);
    if power_words > 0 {
        score += (power_words as f64 * 0.3).min(1.0);
        strengths.push(format!("Contains {} power word(s)", power_words));
    }

    let emotional_words = count_matches(&lower, &rules::EMOTIONAL_WORDS);
    if emotional_words > 0 {
        score += (emotional_words as f64 * 0.3).min(1.0);
        strengths.push(format!("Contains {} emotional word(s)", emotional_words));
    }

    let has_cta = any_match(&lower, &rules::ACTION_WORDS);
    if has_cta {
        score += 0.5;
        strengths.push("Includes a call to action".to_string());
    } else {
        recommendations.push("Consider adding a call to action".to_string());
    }

    if let Some(keywords) = keywords {
        if !keywords.is_empty() {
            let matches = keywords
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .count();
            if matches > 0 {
                score += (matches as f64 * 0.4).min(1.2);
                strengths.push(format!("Includes {} relevant keyword(s)", matches));
            }
        }
    }

    let has_punctuation = description.contains('.') || description.contains(',');
    if has_punctuation {
        score += 0.3;
        strengths.push("Good structure with punctuation".to_string());
    }

    let has_benefit = any_match(&lower, &rules::BENEFIT_WORDS);
    if has_benefit {
        score += 0.4;
        strengths.push("Mentions benefits or guarantees".to_string());
    }

    let score = round1(score.clamp(1.0, 10.0));

    if recommendations.is_empty() {
        if score < 7.0 {
            recommendations.push("Review the flagged issues".to_string());
        }
        if !has_cta {
            recommendations.push("Add: Consulta gratis, Solicita ahora, or similar".to_string());
        }
        if !has_benefit {
            recommendations.push("Mention concrete benefits or guarantees".to_string());
        }
    }

    ScoredField {
        text: description.to_string(),
        score,
        grade: Grade::from_score(score),
        length,
        issues,
        strengths,
        recommendations,
        metrics: FieldMetrics::Description(DescriptionMetrics {
            power_words,
            emotional_words,
            has_cta,
            has_benefit,
            has_punctuation,
        }),
    }
}

/// Words longer than three characters appearing more than once, in order of
/// first occurrence. Expects lowercased text.
fn repeated_words(lower: &str) -> Vec<String> {
    let words: Vec<&str> = lower.split_whitespace().collect();
    let mut repeated = Vec::new();
    for (index, word) in words.iter().enumerate() {
        if word.chars().count() > 3
            && words[..index].iter().all(|seen| seen != word)
            && words[index + 1..].iter().any(|later| later == word)
        {
            repeated.push((*word).to_string());
        }
    }
    repeated
}
