//! Whole-ad scoring: combines per-field scores into one report with
//! diversity and keyword-coverage metrics.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::scoring::field::{score_description, score_headline};
use crate::{round1, Grade, ScoredField};

/// A scored field together with its slot index in the submitted ad, so
/// blank-field skipping keeps positions traceable.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedField {
    pub index: usize,
    #[serde(flatten)]
    pub field: ScoredField,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub total: usize,
    pub used: usize,
    pub usage_rate_percent: f64,
    pub unused: Vec<String>,
    pub counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdScoreReport {
    pub overall_score: f64,
    pub overall_grade: Grade,
    pub headline_scores: Vec<IndexedField>,
    pub description_scores: Vec<IndexedField>,
    pub avg_headline_score: f64,
    pub avg_description_score: f64,
    pub total_issues: usize,
    pub diversity_score: f64,
    pub keyword_analysis: Option<KeywordAnalysis>,
    pub top_recommendations: Vec<String>,
    pub summary: String,
}

/// Scores a full ad. Blank fields are skipped; the overall score weighs
/// headlines 60% and descriptions 40%, with an empty group counting as 0.
pub fn score_ad(
    headlines: &[String],
    descriptions: &[String],
    keywords: Option<&[String]>,
) -> AdScoreReport {
    let headline_scores: Vec<IndexedField> = headlines
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| IndexedField {
            index,
            field: score_headline(text, keywords),
        })
        .collect();

    let description_scores: Vec<IndexedField> = descriptions
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| IndexedField {
            index,
            field: score_description(text, keywords),
        })
        .collect();

    let avg_headline_score = mean_score(&headline_scores);
    let avg_description_score = mean_score(&description_scores);
    let overall_score = round1(avg_headline_score * 0.6 + avg_description_score * 0.4);

    let total_issues = headline_scores
        .iter()
        .chain(&description_scores)
        .map(|entry| entry.field.issues.len())
        .sum();

    let diversity_score = diversity(headlines, descriptions);

    let keyword_analysis = keywords
        .filter(|list| !list.is_empty())
        .map(|list| analyze_keyword_usage(headlines, descriptions, list));

    let top_recommendations = top_recommendations(
        &headline_scores,
        &description_scores,
        keyword_analysis.as_ref(),
    );

    let summary = summarize(overall_score, total_issues);

    AdScoreReport {
        overall_score,
        overall_grade: Grade::from_score(overall_score),
        avg_headline_score: round1(avg_headline_score),
        avg_description_score: round1(avg_description_score),
        headline_scores,
        description_scores,
        total_issues,
        diversity_score,
        keyword_analysis,
        top_recommendations,
        summary,
    }
}

fn mean_score(entries: &[IndexedField]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|entry| entry.field.score).sum::<f64>() / entries.len() as f64
}

/// Unique words over total words across all fields, scaled to 0-10.
/// Plural/singular forms count as distinct words; that coarseness is
/// accepted.
fn diversity(headlines: &[String], descriptions: &[String]) -> f64 {
    let mut all_words: Vec<String> = Vec::new();
    for text in headlines.iter().chain(descriptions) {
        for word in text.to_lowercase().split_whitespace() {
            all_words.push(word.to_string());
        }
    }
    if all_words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&String> = all_words.iter().collect();
    round1(unique.len() as f64 / all_words.len() as f64 * 10.0)
}

fn analyze_keyword_usage(
    headlines: &[String],
    descriptions: &[String],
    keywords: &[String],
) -> KeywordAnalysis {
    let all_text = headlines
        .iter()
        .chain(descriptions)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut counts = BTreeMap::new();
    let mut unused = Vec::new();
    for keyword in keywords {
        let count = all_text.matches(&keyword.to_lowercase()).count();
        if count == 0 {
            unused.push(keyword.clone());
        }
        counts.insert(keyword.clone(), count);
    }

    let used = keywords.len() - unused.len();
    KeywordAnalysis {
        total: keywords.len(),
        used,
        usage_rate_percent: round1(used as f64 / keywords.len() as f64 * 100.0),
        unused,
        counts,
    }
}

fn top_recommendations(
    headline_scores: &[IndexedField],
    description_scores: &[IndexedField],
    keyword_analysis: Option<&KeywordAnalysis>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let low_headlines = headline_scores
        .iter()
        .filter(|entry| entry.field.score < 7.0)
        .count();
    if low_headlines > 0 {
        recommendations.push(format!("Improve {} low-scoring headline(s)", low_headlines));
    }

    let low_descriptions = description_scores
        .iter()
        .filter(|entry| entry.field.score < 7.0)
        .count();
    if low_descriptions > 0 {
        recommendations.push(format!(
            "Improve {} low-scoring description(s)",
            low_descriptions
        ));
    }

    if let Some(analysis) = keyword_analysis {
        if !analysis.unused.is_empty() {
            recommendations.push(format!(
                "Work in {} unused keyword(s)",
                analysis.unused.len()
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push("The ad is well optimized".to_string());
        recommendations.push("Consider A/B testing to push performance further".to_string());
    }

    recommendations.truncate(5);
    recommendations
}

fn summarize(overall_score: f64, total_issues: usize) -> String {
    let quality = if overall_score >= 8.0 {
        "excellent"
    } else if overall_score >= 7.0 {
        "good"
    } else if overall_score >= 6.0 {
        "acceptable"
    } else {
        "in need of work"
    };

    let grade = Grade::from_score(overall_score);
    let mut summary = format!(
        "Ad quality is {} with a score of {:.1}/10 ({}). ",
        quality,
        overall_score,
        grade.label()
    );

    if total_issues == 0 {
        summary.push_str("No issues detected.");
    } else if total_issues <= 3 {
        summary.push_str(&format!("{} minor issue(s) detected.", total_issues));
    } else {
        summary.push_str(&format!("{} issues need fixing.", total_issues));
    }

    summary
}
