//! Winner selection over observed test metrics.
//!
//! The confidence figure is a bucketed heuristic over the relative gap
//! between the winner's composite score and the mean of the rest; it is not
//! a hypothesis test.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::round2;

/// Real metrics reported by the ad channel for one variation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObservedMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariationScore {
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    /// None when the variation converted nothing; serialized as null.
    pub cost_per_conversion: Option<f64>,
    pub composite_score: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsufficientData {
    pub label: String,
    pub observed_count: u64,
    pub required_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WinnerDecision {
    pub winner_label: Option<String>,
    pub composite_scores: BTreeMap<String, f64>,
    pub variation_scores: BTreeMap<String, VariationScore>,
    pub statistical_confidence: f64,
    pub is_significant: bool,
    pub insufficient_data: Vec<InsufficientData>,
    pub next_steps: Vec<String>,
}

pub struct WinnerSelector {
    min_clicks: u64,
    min_confidence: f64,
}

impl Default for WinnerSelector {
    fn default() -> Self {
        Self {
            min_clicks: 100,
            min_confidence: 0.95,
        }
    }
}

impl WinnerSelector {
    pub fn new(min_clicks: u64, min_confidence: f64) -> Self {
        Self {
            min_clicks,
            min_confidence,
        }
    }

    pub fn min_clicks(&self) -> u64 {
        self.min_clicks
    }

    /// Ranks variations by composite score and certifies a winner. No
    /// variation reaching `min_clicks` is a normal, winner-less outcome.
    pub fn recommend_winner(
        &self,
        observed: &BTreeMap<String, ObservedMetrics>,
    ) -> WinnerDecision {
        let mut insufficient = Vec::new();
        let mut scores: BTreeMap<String, VariationScore> = BTreeMap::new();

        for (label, metrics) in observed {
            if metrics.clicks < self.min_clicks {
                insufficient.push(InsufficientData {
                    label: label.clone(),
                    observed_count: metrics.clicks,
                    required_count: self.min_clicks,
                });
            } else {
                scores.insert(label.clone(), score_variation(metrics));
            }
        }

        if scores.is_empty() {
            return WinnerDecision {
                winner_label: None,
                composite_scores: BTreeMap::new(),
                variation_scores: BTreeMap::new(),
                statistical_confidence: 0.0,
                is_significant: false,
                insufficient_data: insufficient,
                next_steps: vec![format!(
                    "Keep the test running until every variation reaches {} clicks",
                    self.min_clicks
                )],
            };
        }

        let mut winner_label = String::new();
        let mut best = f64::NEG_INFINITY;
        for (label, score) in &scores {
            if score.composite_score > best {
                best = score.composite_score;
                winner_label = label.clone();
            }
        }

        let statistical_confidence = statistical_confidence(&scores, &winner_label);
        let is_significant = statistical_confidence >= self.min_confidence;
        let next_steps = next_steps(
            &winner_label,
            scores.get(&winner_label),
            statistical_confidence,
            self.min_confidence,
        );
        let composite_scores = scores
            .iter()
            .map(|(label, score)| (label.clone(), score.composite_score))
            .collect();

        WinnerDecision {
            winner_label: Some(winner_label),
            composite_scores,
            variation_scores: scores,
            statistical_confidence,
            is_significant,
            insufficient_data: insufficient,
            next_steps,
        }
    }
}

fn score_variation(metrics: &ObservedMetrics) -> VariationScore {
    let ctr = if metrics.impressions > 0 {
        metrics.clicks as f64 / metrics.impressions as f64 * 100.0
    } else {
        0.0
    };
    let conversion_rate = if metrics.clicks > 0 {
        metrics.conversions as f64 / metrics.clicks as f64 * 100.0
    } else {
        0.0
    };
    let cpc = if metrics.clicks > 0 {
        metrics.cost / metrics.clicks as f64
    } else {
        0.0
    };
    let cost_per_conversion = if metrics.conversions > 0 {
        Some(metrics.cost / metrics.conversions as f64)
    } else {
        None
    };

    // CTR 30%, conversion rate 40%, cost efficiency 30%; each term
    // normalized to [0, 1] before weighting.
    let ctr_score = (ctr / 10.0).min(1.0);
    let conversion_score = (conversion_rate / 10.0).min(1.0);
    let cost_score = cost_per_conversion
        .map(|value| (1.0 - value / 100.0).max(0.0))
        .unwrap_or(0.0);
    let composite = (ctr_score * 0.3 + conversion_score * 0.4 + cost_score * 0.3) * 100.0;

    VariationScore {
        ctr: round2(ctr),
        conversion_rate: round2(conversion_rate),
        cpc: round2(cpc),
        cost_per_conversion: cost_per_conversion.map(round2),
        composite_score: round2(composite),
        impressions: metrics.impressions,
        clicks: metrics.clicks,
        conversions: metrics.conversions,
        cost: round2(metrics.cost),
    }
}

/// Maps the winner's relative lead over the mean of the other variations to
/// fixed confidence buckets. Fewer than two valid variations pins 0.5.
fn statistical_confidence(scores: &BTreeMap<String, VariationScore>, winner_label: &str) -> f64 {
    if scores.len() < 2 {
        return 0.5;
    }

    let winner = scores
        .get(winner_label)
        .map(|score| score.composite_score)
        .unwrap_or(0.0);
    let others: Vec<f64> = scores
        .iter()
        .filter(|(label, _)| label.as_str() != winner_label)
        .map(|(_, score)| score.composite_score)
        .collect();
    if others.is_empty() {
        return 0.5;
    }

    let mean_other = others.iter().sum::<f64>() / others.len() as f64;
    if mean_other == 0.0 {
        return 0.9;
    }

    let difference = (winner - mean_other) / mean_other;
    if difference >= 0.30 {
        0.95
    } else if difference >= 0.20 {
        0.90
    } else if difference >= 0.10 {
        0.75
    } else if difference >= 0.05 {
        0.60
    } else {
        0.50
    }
}

fn next_steps(
    winner_label: &str,
    winner: Option<&VariationScore>,
    confidence: f64,
    min_confidence: f64,
) -> Vec<String> {
    let mut steps = Vec::new();
    if confidence >= min_confidence {
        steps.push(format!(
            "Implement variation {} as the primary ad",
            winner_label
        ));
        steps.push("Consider building new variations on top of the winner".to_string());
        steps.push("Monitor performance for the next 30 days".to_string());
    } else {
        steps.push(format!(
            "Keep the test running - current confidence {:.0}%",
            confidence * 100.0
        ));
        steps.push(format!("Target confidence: {:.0}%", min_confidence * 100.0));
        steps.push("Increase the budget to gather data faster".to_string());
    }

    if let Some(winner) = winner {
        if winner.ctr < 3.0 {
            steps.push("CTR is low - consider stronger headlines".to_string());
        }
        if winner.conversion_rate < 3.0 {
            steps.push("Conversion rate is low - review the landing page".to_string());
        }
    }

    steps
}
