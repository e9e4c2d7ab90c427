use serde::Deserialize;
use std::collections::BTreeMap;

use adcopy_lab::variation::{variation_label, Variation};
use adcopy_lab::winner::ObservedMetrics;
use adcopy_lab::FieldKind;

#[derive(Debug, Deserialize)]
pub struct ScoreFieldRequest {
    pub kind: Option<String>,
    pub text: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ScoreFieldRequest {
    pub fn into_parts(self) -> Result<(FieldKind, String, Option<Vec<String>>), String> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err("text is required".to_string());
        }
        let kind = parse_kind(self.kind.as_deref())?;
        Ok((kind, text, self.keywords))
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreAdRequest {
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub kind: Option<String>,
    pub text: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub target_score: Option<f64>,
}

impl OptimizeRequest {
    pub fn into_parts(
        self,
    ) -> Result<(FieldKind, String, Option<Vec<String>>, Option<f64>), String> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err("text is required".to_string());
        }
        let kind = parse_kind(self.kind.as_deref())?;
        Ok((kind, text, self.keywords, self.target_score))
    }
}

#[derive(Debug, Deserialize)]
pub struct VariationPayload {
    pub label: Option<String>,
    pub tone: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl VariationPayload {
    pub fn into_variation(self, index: usize) -> Variation {
        Variation {
            label: self.label.unwrap_or_else(|| variation_label(index)),
            kind: self.tone.clone(),
            tone: self.tone,
            headlines: self.headlines,
            descriptions: self.descriptions,
            generated_at: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub variations: Vec<VariationPayload>,
    pub business_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WinnerRequest {
    pub variations: BTreeMap<String, ObservedMetrics>,
    pub min_clicks: Option<u64>,
    pub min_confidence: Option<f64>,
}

fn parse_kind(kind: Option<&str>) -> Result<FieldKind, String> {
    match kind.unwrap_or("headline") {
        "headline" => Ok(FieldKind::Headline),
        "description" => Ok(FieldKind::Description),
        other => Err(format!("invalid field kind: {}", other)),
    }
}
