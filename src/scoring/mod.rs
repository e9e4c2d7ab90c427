pub mod aggregate;
pub mod field;

pub use aggregate::{score_ad, AdScoreReport, IndexedField, KeywordAnalysis};
pub use field::{score_description, score_headline};
