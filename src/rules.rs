//! Compiled-in rule tables shared by the scoring, optimization and
//! prediction modules. Word matching everywhere is case-insensitive
//! substring matching, as the ad channel's review heuristics are.

/// Hard character limit for a headline.
pub const HEADLINE_MAX: usize = 30;
/// Length at which a headline is flagged as close to the limit.
pub const HEADLINE_NEAR_LIMIT: usize = 28;
/// Headlines below this read as too thin.
pub const HEADLINE_MIN: usize = 15;

pub const DESCRIPTION_MAX: usize = 90;
pub const DESCRIPTION_NEAR_LIMIT: usize = 85;
pub const DESCRIPTION_MIN: usize = 40;

/// Punctuation the ad channel rejects in copy.
pub const FORBIDDEN_PUNCTUATION: [char; 4] = ['!', '?', '¡', '¿'];

/// Phrases that get an ad disapproved. Scanned in full on every field.
pub const FORBIDDEN_PHRASES: [&str; 11] = [
    "gratis siempre",
    "100% garantizado",
    "milagro",
    "infalible",
    "engaño",
    "estafa",
    "magia negra gratuita",
    "seguro que funciona",
    "nunca falla",
    "totalmente gratis",
    "sin riesgo alguno",
];

pub const POWER_WORDS: [&str; 16] = [
    "garantizado",
    "efectivo",
    "profesional",
    "experto",
    "certificado",
    "poderoso",
    "rápido",
    "inmediato",
    "real",
    "auténtico",
    "discreto",
    "personalizado",
    "exclusivo",
    "comprobado",
    "urgente",
    "ahora",
];

pub const ACTION_WORDS: [&str; 17] = [
    "descubre",
    "obtén",
    "consigue",
    "solicita",
    "pide",
    "consulta",
    "conoce",
    "aprende",
    "mejora",
    "transforma",
    "cambia",
    "encuentra",
    "recibe",
    "accede",
    "contacta",
    "llama",
    "escribe",
];

pub const EMOTIONAL_WORDS: [&str; 11] = [
    "amor",
    "felicidad",
    "paz",
    "esperanza",
    "confianza",
    "seguridad",
    "protección",
    "éxito",
    "prosperidad",
    "armonía",
    "bienestar",
];

/// Words that signal an explicit benefit or guarantee in a description.
pub const BENEFIT_WORDS: [&str; 5] = [
    "resultado",
    "garantía",
    "efectivo",
    "profesional",
    "experiencia",
];

/// Filler appended by the optimizer when a headline lacks a power word.
pub const HEADLINE_FILLER: &str = "Efectivo";
/// Filler appended by the optimizer when a description lacks a CTA.
pub const DESCRIPTION_FILLER: &str = "Consulta ahora.";

// --- Prediction benchmark tables -----------------------------------------

/// Average CTR (%) per tone observed for esoteric-services campaigns.
pub const ESOTERIC_TONE_CTR: [(&str, f64); 7] = [
    ("emocional", 4.2),
    ("urgente", 5.1),
    ("profesional", 3.8),
    ("místico", 4.5),
    ("esperanzador", 3.9),
    ("poderoso", 4.7),
    ("tranquilizador", 3.5),
];

pub const GENERIC_TONE_CTR: [(&str, f64); 4] = [
    ("emocional", 2.8),
    ("urgente", 3.5),
    ("profesional", 3.2),
    ("informativo", 2.9),
];

/// Fallback CTR when the tone or business type has no benchmark entry.
pub const DEFAULT_BASE_CTR: f64 = 3.0;

/// Looks up the benchmark CTR for a `(business_type, tone)` pair.
pub fn base_ctr(business_type: &str, tone: &str) -> f64 {
    let table: &[(&str, f64)] = match business_type {
        "esoteric" => &ESOTERIC_TONE_CTR,
        "generic" => &GENERIC_TONE_CTR,
        _ => return DEFAULT_BASE_CTR,
    };
    table
        .iter()
        .find(|(name, _)| *name == tone)
        .map(|(_, ctr)| *ctr)
        .unwrap_or(DEFAULT_BASE_CTR)
}

// Per-feature CTR adjustments, in percentage points. Each feature counts
// at most once per variation no matter how often it matches.
pub const IMPACT_POWER_WORDS: f64 = 0.3;
pub const IMPACT_ACTION_CTA: f64 = 0.5;
pub const IMPACT_NUMBERS: f64 = 0.2;
pub const IMPACT_BENEFITS: f64 = 0.4;
pub const IMPACT_URGENCY: f64 = 0.6;
pub const IMPACT_LENGTH_OPTIMAL: f64 = 0.2;

// The predictor works from tighter word lists than the field scorer; these
// match the benchmark data the deltas were derived from.
pub const PREDICTOR_POWER_WORDS: [&str; 4] =
    ["garantizado", "efectivo", "profesional", "poderoso"];
pub const PREDICTOR_ACTION_WORDS: [&str; 4] = ["consulta", "solicita", "obtén", "descubre"];
pub const PREDICTOR_BENEFIT_WORDS: [&str; 4] = ["resultado", "garantía", "éxito", "efectivo"];
pub const PREDICTOR_URGENCY_WORDS: [&str; 5] = ["ahora", "ya", "hoy", "inmediato", "rápido"];

/// Mean headline length window that earns the `length_optimal` feature.
pub const OPTIMAL_HEADLINE_RANGE: (f64, f64) = (20.0, 28.0);

/// Base CPC (USD) the quality-score discount is applied to.
pub const BASE_CPC: f64 = 1.50;

/// Assumed conversion rate used for the per-100-clicks projection.
pub const ASSUMED_CONVERSION_RATE: f64 = 0.05;
