//! Tone-based variation assembly for A/B comparison sessions.
//!
//! Text creation is delegated to a [`CopySource`] collaborator; this module
//! owns labeling, tone mapping, session structure and the comparative
//! analysis of the assembled set.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{char_len, round1};

/// Candidate copy produced by a generation collaborator for one tone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCopy {
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
}

/// Produces candidate copy for one tone. Returning `None` skips that
/// variation; it is a reportable outcome, not an error.
pub trait CopySource {
    fn copy_for(
        &mut self,
        tone: &str,
        want_headlines: usize,
        want_descriptions: usize,
    ) -> Option<GeneratedCopy>;
}

/// Slices a caller-provided base ad; the fallback when no generator is
/// configured.
pub struct BaseAdSource {
    headlines: Vec<String>,
    descriptions: Vec<String>,
}

impl BaseAdSource {
    pub fn new(headlines: Vec<String>, descriptions: Vec<String>) -> Self {
        Self {
            headlines,
            descriptions,
        }
    }
}

impl CopySource for BaseAdSource {
    fn copy_for(
        &mut self,
        _tone: &str,
        want_headlines: usize,
        want_descriptions: usize,
    ) -> Option<GeneratedCopy> {
        Some(GeneratedCopy {
            headlines: self.headlines.iter().take(want_headlines).cloned().collect(),
            descriptions: self
                .descriptions
                .iter()
                .take(want_descriptions)
                .cloned()
                .collect(),
        })
    }
}

/// Copy fetched ahead of time (e.g. by the async batch layer), handed out
/// per tone in arrival order.
#[derive(Default)]
pub struct PrefetchedSource {
    by_tone: HashMap<String, VecDeque<GeneratedCopy>>,
}

impl PrefetchedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tone: &str, copy: GeneratedCopy) {
        self.by_tone.entry(tone.to_string()).or_default().push_back(copy);
    }
}

impl CopySource for PrefetchedSource {
    fn copy_for(
        &mut self,
        tone: &str,
        _want_headlines: usize,
        _want_descriptions: usize,
    ) -> Option<GeneratedCopy> {
        self.by_tone.get_mut(tone).and_then(|queue| queue.pop_front())
    }
}

pub const VARIATION_LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

pub fn variation_label(index: usize) -> String {
    VARIATION_LABELS
        .get(index)
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("V{}", index + 1))
}

/// Maps a requested variation kind to the tone the generator understands.
pub fn tone_for_kind(kind: &str) -> &str {
    match kind {
        "racional" => "profesional",
        other => other,
    }
}

/// One labeled, tone-specific version of an ad. Immutable once built;
/// regeneration replaces it with a fresh value and bumps the session's
/// version counter.
#[derive(Debug, Clone, Serialize)]
pub struct Variation {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tone: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub generated_at: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariationAnalysis {
    pub label: String,
    pub tone: String,
    pub num_headlines: usize,
    pub num_descriptions: usize,
    pub avg_headline_length: f64,
    pub avg_description_length: f64,
    pub keyword_matches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UniquenessReport {
    pub total_headlines: usize,
    pub unique_headlines: usize,
    pub uniqueness_rate_headlines: f64,
    pub total_descriptions: usize,
    pub unique_descriptions: usize,
    pub uniqueness_rate_descriptions: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariationSetAnalysis {
    pub total_variations: usize,
    pub by_variation: Vec<VariationAnalysis>,
    pub unique_elements: UniquenessReport,
}

/// What to build: which variation kinds, and how much copy per variation.
#[derive(Debug, Clone)]
pub struct VariationPlan {
    pub keywords: Vec<String>,
    pub kinds: Vec<String>,
    pub num_headlines: usize,
    pub num_descriptions: usize,
}

impl VariationPlan {
    pub fn new(keywords: Vec<String>, kinds: Vec<String>) -> Self {
        Self {
            keywords,
            kinds,
            num_headlines: 15,
            num_descriptions: 4,
        }
    }
}

/// A comparison session: the assembled variations plus their analysis and
/// per-label version counters.
#[derive(Debug, Clone, Serialize)]
pub struct ToneTest {
    pub test_id: String,
    pub created_at: u64,
    pub keywords: Vec<String>,
    pub requested_headlines: usize,
    pub requested_descriptions: usize,
    pub variations: Vec<Variation>,
    pub versions: BTreeMap<String, u32>,
    pub analysis: VariationSetAnalysis,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

impl ToneTest {
    pub fn variation(&self, label: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.label == label)
    }

    /// Replaces one variation with freshly generated copy and bumps its
    /// version counter. Returns false when the label is unknown or the
    /// source produced nothing.
    pub fn regenerate(&mut self, label: &str, source: &mut dyn CopySource) -> bool {
        let want_headlines = self.requested_headlines;
        let want_descriptions = self.requested_descriptions;
        let Some(slot) = self.variations.iter_mut().find(|v| v.label == label) else {
            return false;
        };
        let Some(copy) = source.copy_for(&slot.tone, want_headlines, want_descriptions) else {
            return false;
        };
        slot.headlines = copy.headlines;
        slot.descriptions = copy.descriptions;
        slot.generated_at = now_ms();
        *self.versions.entry(label.to_string()).or_insert(1) += 1;
        self.analysis = analyze_variations(&self.variations, &self.keywords);
        true
    }
}

/// Assembles a tone test, pulling copy for each requested kind from the
/// source. Kinds whose source comes up empty are skipped with a warning.
pub fn build_tone_test(plan: &VariationPlan, source: &mut dyn CopySource) -> ToneTest {
    let created_at = now_ms();
    let mut variations = Vec::new();
    let mut warnings = Vec::new();

    if plan.keywords.is_empty() {
        warnings.push("No keywords supplied; keyword coverage will read as zero".to_string());
    }

    for (index, kind) in plan.kinds.iter().enumerate() {
        let label = variation_label(index);
        let tone = tone_for_kind(kind).to_string();
        match source.copy_for(&tone, plan.num_headlines, plan.num_descriptions) {
            Some(copy) => variations.push(Variation {
                label,
                kind: kind.clone(),
                tone,
                headlines: copy.headlines,
                descriptions: copy.descriptions,
                generated_at: now_ms(),
            }),
            None => warnings.push(format!("Variation {} ({}) could not be generated", label, tone)),
        }
    }

    let analysis = analyze_variations(&variations, &plan.keywords);
    let recommendations = test_recommendations(&variations);
    let versions = variations.iter().map(|v| (v.label.clone(), 1u32)).collect();

    ToneTest {
        test_id: format!("abtest_{}", created_at),
        created_at,
        keywords: plan.keywords.clone(),
        requested_headlines: plan.num_headlines,
        requested_descriptions: plan.num_descriptions,
        variations,
        versions,
        analysis,
        recommendations,
        warnings,
    }
}

pub fn analyze_variations(variations: &[Variation], keywords: &[String]) -> VariationSetAnalysis {
    let mut by_variation = Vec::new();
    let mut all_headlines: Vec<&String> = Vec::new();
    let mut all_descriptions: Vec<&String> = Vec::new();

    for variation in variations {
        all_headlines.extend(variation.headlines.iter());
        all_descriptions.extend(variation.descriptions.iter());

        let pooled = variation
            .headlines
            .iter()
            .chain(&variation.descriptions)
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let keyword_matches = keywords
            .iter()
            .filter(|kw| pooled.contains(&kw.to_lowercase()))
            .count();

        by_variation.push(VariationAnalysis {
            label: variation.label.clone(),
            tone: variation.tone.clone(),
            num_headlines: variation.headlines.len(),
            num_descriptions: variation.descriptions.len(),
            avg_headline_length: mean_length(&variation.headlines),
            avg_description_length: mean_length(&variation.descriptions),
            keyword_matches,
        });
    }

    VariationSetAnalysis {
        total_variations: variations.len(),
        by_variation,
        unique_elements: UniquenessReport {
            total_headlines: all_headlines.len(),
            unique_headlines: unique_count(&all_headlines),
            uniqueness_rate_headlines: uniqueness_rate(&all_headlines),
            total_descriptions: all_descriptions.len(),
            unique_descriptions: unique_count(&all_descriptions),
            uniqueness_rate_descriptions: uniqueness_rate(&all_descriptions),
        },
    }
}

fn test_recommendations(variations: &[Variation]) -> Vec<String> {
    if variations.is_empty() {
        return vec!["No variations to analyze".to_string()];
    }

    let all_headlines: Vec<&String> = variations.iter().flat_map(|v| v.headlines.iter()).collect();
    let unique_rate = if all_headlines.is_empty() {
        0.0
    } else {
        unique_count(&all_headlines) as f64 / all_headlines.len() as f64
    };

    let mut recommendations = Vec::new();
    if unique_rate < 0.7 {
        recommendations
            .push("Increase diversity across variations for more conclusive results".to_string());
    }
    recommendations
        .push("Run the test for at least 7 days to get statistically meaningful data".to_string());
    recommendations
        .push("Collect at least 100 clicks per variation before making decisions".to_string());
    recommendations.push("Split traffic evenly across the variations".to_string());
    recommendations
        .push("Track CTR, quality score and conversion rate, not just clicks".to_string());
    recommendations
}

fn mean_length(texts: &[String]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    round1(texts.iter().map(|t| char_len(t) as f64).sum::<f64>() / texts.len() as f64)
}

fn unique_count(texts: &[&String]) -> usize {
    texts.iter().collect::<HashSet<_>>().len()
}

fn uniqueness_rate(texts: &[&String]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    round1(unique_count(texts) as f64 / texts.len() as f64 * 100.0)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}
