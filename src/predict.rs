//! Heuristic performance prediction for assembled variations: benchmark
//! CTR per tone plus additive per-feature adjustments.

use serde::Serialize;

use crate::rules;
use crate::variation::Variation;
use crate::{any_match, char_len, contains_digit, round1, round2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub variation_label: String,
    pub tone: String,
    pub predicted_ctr: f64,
    pub base_ctr: f64,
    pub adjustments: f64,
    pub features_detected: Vec<String>,
    pub quality_score: f64,
    pub estimated_cpc: f64,
    pub estimated_conversions_per_100_clicks: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestPrediction {
    pub variation_label: String,
    pub predicted_ctr: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionSet {
    pub business_type: String,
    pub predictions: Vec<PredictionResult>,
    pub best_predicted: Option<BestPrediction>,
    pub confidence_level: ConfidenceLevel,
}

pub struct PerformancePredictor {
    business_type: String,
}

impl PerformancePredictor {
    pub fn new(business_type: impl Into<String>) -> Self {
        Self {
            business_type: business_type.into(),
        }
    }

    /// Predicts CTR, quality score and CPC for one variation. Unknown tones
    /// and business types fall back to the generic benchmark.
    pub fn predict(&self, variation: &Variation) -> PredictionResult {
        let base_ctr = rules::base_ctr(&self.business_type, &variation.tone);
        let pooled = variation
            .headlines
            .iter()
            .chain(&variation.descriptions)
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        // Each feature counts once no matter how many times it matches.
        let mut adjustments = 0.0;
        let mut features = Vec::new();
        if any_match(&pooled, &rules::PREDICTOR_POWER_WORDS) {
            adjustments += rules::IMPACT_POWER_WORDS;
            features.push("power_words".to_string());
        }
        if any_match(&pooled, &rules::PREDICTOR_ACTION_WORDS) {
            adjustments += rules::IMPACT_ACTION_CTA;
            features.push("action_cta".to_string());
        }
        if contains_digit(&pooled) {
            adjustments += rules::IMPACT_NUMBERS;
            features.push("numbers".to_string());
        }
        if any_match(&pooled, &rules::PREDICTOR_BENEFIT_WORDS) {
            adjustments += rules::IMPACT_BENEFITS;
            features.push("benefits".to_string());
        }
        if any_match(&pooled, &rules::PREDICTOR_URGENCY_WORDS) {
            adjustments += rules::IMPACT_URGENCY;
            features.push("urgency".to_string());
        }
        if !variation.headlines.is_empty() {
            let mean_len = variation
                .headlines
                .iter()
                .map(|h| char_len(h) as f64)
                .sum::<f64>()
                / variation.headlines.len() as f64;
            let (lo, hi) = rules::OPTIMAL_HEADLINE_RANGE;
            if mean_len >= lo && mean_len <= hi {
                adjustments += rules::IMPACT_LENGTH_OPTIMAL;
                features.push("length_optimal".to_string());
            }
        }

        let predicted_ctr = round2(base_ctr + adjustments);
        let quality_score = round1((6.0 + features.len() as f64 * 0.5).min(10.0));
        let estimated_cpc = round2(rules::BASE_CPC * (10.0 / quality_score));
        let estimated_conversions_per_100_clicks =
            round2(predicted_ctr * rules::ASSUMED_CONVERSION_RATE);
        let confidence = round2((0.5 + features.len() as f64 * 0.08).min(1.0));

        PredictionResult {
            variation_label: variation.label.clone(),
            tone: variation.tone.clone(),
            predicted_ctr,
            base_ctr,
            adjustments: round2(adjustments),
            features_detected: features,
            quality_score,
            estimated_cpc,
            estimated_conversions_per_100_clicks,
            confidence,
        }
    }

    /// Predicts every variation, picks the highest predicted CTR (first
    /// wins on ties) and buckets the mean confidence.
    pub fn predict_set(&self, variations: &[Variation]) -> PredictionSet {
        let predictions: Vec<PredictionResult> =
            variations.iter().map(|v| self.predict(v)).collect();

        let mut best: Option<&PredictionResult> = None;
        for prediction in &predictions {
            let beats = best
                .map(|current| prediction.predicted_ctr > current.predicted_ctr)
                .unwrap_or(true);
            if beats {
                best = Some(prediction);
            }
        }

        let best_predicted = best.map(|p| BestPrediction {
            variation_label: p.variation_label.clone(),
            predicted_ctr: p.predicted_ctr,
            reason: format!(
                "Highest predicted CTR based on {} detected feature(s)",
                p.features_detected.len()
            ),
        });

        let confidence_level = if predictions.is_empty() {
            ConfidenceLevel::Medium
        } else {
            let mean =
                predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64;
            if mean >= 0.8 {
                ConfidenceLevel::High
            } else if mean >= 0.6 {
                ConfidenceLevel::Medium
            } else {
                ConfidenceLevel::Low
            }
        };

        PredictionSet {
            business_type: self.business_type.clone(),
            predictions,
            best_predicted,
            confidence_level,
        }
    }
}
