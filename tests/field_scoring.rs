use adcopy_lab::rules;
use adcopy_lab::scoring::{score_description, score_headline};
use adcopy_lab::{FieldMetrics, Grade};

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn caps_and_punctuation_drag_a_headline_down() {
    // 30 chars: near-limit -1.0, all caps -2.0, '!' -1.0, power word +0.5
    let field = score_headline("AMARRES DE AMOR GARANTIZADOS!!", None);

    assert!((field.score - 6.5).abs() < 1e-6);
    assert_eq!(field.grade, Grade::C);
    assert!(field.grade <= Grade::C);
    assert!(field
        .issues
        .iter()
        .any(|issue| issue.contains("entirely in capitals")));
    assert!(field
        .issues
        .iter()
        .any(|issue| issue.contains("banned character")));
}

#[test]
fn short_headline_gets_length_penalty_only() {
    let field = score_headline("Tarot", None);

    assert!((field.score - 8.5).abs() < 1e-6);
    assert_eq!(field.grade, Grade::A);
    assert_eq!(field.length, 5);
    assert!(field.issues.iter().any(|issue| issue.contains("Too short")));
    assert!(field.strengths.is_empty());
}

#[test]
fn score_is_clamped_to_lower_bound() {
    let field = score_headline(
        "GRATIS SIEMPRE MILAGRO INFALIBLE NUNCA FALLA TOTALMENTE GRATIS!!!!",
        None,
    );

    assert!((field.score - 1.0).abs() < 1e-6);
    assert_eq!(field.grade, Grade::F);
}

#[test]
fn empty_input_scores_without_failing() {
    let field = score_headline("", None);

    assert!((field.score - 8.5).abs() < 1e-6);
    assert_eq!(field.length, 0);
    assert_eq!(field, score_headline("", None));
}

#[test]
fn scoring_is_idempotent() {
    let keywords = kw(&["amarres de amor"]);
    let first = score_headline("Amarres de Amor Efectivos", Some(&keywords));
    let second = score_headline("Amarres de Amor Efectivos", Some(&keywords));
    assert_eq!(first, second);

    let first = score_description("Consulta gratis hoy mismo", Some(&keywords));
    let second = score_description("Consulta gratis hoy mismo", Some(&keywords));
    assert_eq!(first, second);
}

#[test]
fn grade_boundaries_sit_at_whole_scores() {
    assert_eq!(Grade::from_score(9.0), Grade::APlus);
    assert_eq!(Grade::from_score(8.9), Grade::A);
    assert_eq!(Grade::from_score(8.0), Grade::A);
    assert_eq!(Grade::from_score(7.9), Grade::B);
    assert_eq!(Grade::from_score(7.0), Grade::B);
    assert_eq!(Grade::from_score(6.0), Grade::C);
    assert_eq!(Grade::from_score(5.0), Grade::D);
    assert_eq!(Grade::from_score(4.9), Grade::F);
    assert_eq!(Grade::from_score(1.0), Grade::F);
}

#[test]
fn keyword_match_rewards_and_miss_penalizes_headlines() {
    let matched = score_headline("Tarot Premium", Some(&kw(&["tarot"])));
    assert!((matched.score - 9.0).abs() < 1e-6);
    assert_eq!(matched.grade, Grade::APlus);

    let missed = score_headline("Tarot Premium", Some(&kw(&["amarres"])));
    assert!((missed.score - 8.0).abs() < 1e-6);
    assert!(missed
        .recommendations
        .iter()
        .any(|rec| rec.contains("keyword")));
}

#[test]
fn repeated_word_penalty_is_flat() {
    let once_repeated = score_headline("Amor Eterno Amor Total", None);
    assert!((once_repeated.score - 9.5).abs() < 1e-6);
    assert!(once_repeated
        .issues
        .iter()
        .any(|issue| issue.contains("amor")));

    let thrice_repeated = score_headline("Amor Amor Amor Eterno", None);
    assert!((thrice_repeated.score - 9.5).abs() < 1e-6);
}

#[test]
fn every_banned_phrase_is_penalized_per_match() {
    for phrase in rules::FORBIDDEN_PHRASES {
        let field = score_headline(&format!("Tarot {}", phrase), None);
        assert!(
            field.issues.iter().any(|issue| issue.contains(phrase)),
            "phrase '{}' was not flagged",
            phrase
        );
    }

    // Two phrases stack: -2.5 each, near-limit -1.0, power word +0.5.
    let field = score_headline("Milagro Infalible Garantizado", None);
    assert!((field.score - 4.5).abs() < 1e-6);
    assert_eq!(field.grade, Grade::F);
}

#[test]
fn every_power_word_is_detected() {
    for word in rules::POWER_WORDS {
        let field = score_headline(word, None);
        let FieldMetrics::Headline(metrics) = field.metrics else {
            panic!("expected headline metrics");
        };
        assert!(metrics.power_words >= 1, "power word '{}' missed", word);
    }
}

#[test]
fn headline_metrics_report_detected_signals() {
    let field = score_headline("Consulta Tarot 24h Ahora", None);
    let FieldMetrics::Headline(metrics) = field.metrics else {
        panic!("expected headline metrics");
    };

    assert!(metrics.has_numbers);
    assert!(metrics.power_words >= 1);
    assert!(metrics.action_words >= 1);
    assert!(metrics.capitalization_ratio > 0.0 && metrics.capitalization_ratio < 0.5);
}

#[test]
fn strong_description_caps_at_ten() {
    let field = score_description(
        "Amarres de amor con magia blanca efectiva. Resultados rápidos garantizados.",
        None,
    );

    assert!((field.score - 10.0).abs() < 1e-6);
    assert_eq!(field.grade, Grade::APlus);
    let FieldMetrics::Description(metrics) = field.metrics else {
        panic!("expected description metrics");
    };
    assert!(!metrics.has_cta);
    assert!(metrics.has_benefit);
    assert!(metrics.has_punctuation);
}

#[test]
fn shouting_description_is_penalized() {
    // Short -1.5, all caps -2.0, '!' -0.8, power +0.3, CTA +0.5.
    let field = score_description("CONSULTA GRATIS AHORA MISMO!!!!", None);

    assert!((field.score - 6.5).abs() < 1e-6);
    assert_eq!(field.grade, Grade::C);
    let FieldMetrics::Description(metrics) = field.metrics else {
        panic!("expected description metrics");
    };
    assert!(metrics.has_cta);
    assert!(!metrics.has_punctuation);
}

#[test]
fn description_without_cta_gets_the_nudge() {
    let field = score_description(
        "Amarres de amor con magia blanca efectiva. Resultados rápidos garantizados.",
        None,
    );
    assert!(field
        .recommendations
        .iter()
        .any(|rec| rec.contains("call to action")));
}

#[test]
fn scores_stay_in_range_for_arbitrary_inputs() {
    let samples = [
        "",
        " ",
        "a",
        "1234567890",
        "¡¿!?",
        "GRATIS SIEMPRE",
        "texto normal sin nada especial que lo haga destacar en absoluto",
        "Amarres de Amor Garantizados Consulta Ahora Mismo Resultados",
    ];
    for sample in samples {
        let headline = score_headline(sample, None);
        assert!((1.0..=10.0).contains(&headline.score), "headline '{}'", sample);
        let description = score_description(sample, None);
        assert!(
            (1.0..=10.0).contains(&description.score),
            "description '{}'",
            sample
        );
    }
}

#[test]
fn scored_field_serializes_with_flat_metrics() {
    let field = score_headline("Tarot", None);
    let value = serde_json::to_value(&field).unwrap();

    assert_eq!(value["grade"], "A");
    assert!(value["metrics"]["capitalization_ratio"].is_number());
    assert!(value["metrics"]["has_numbers"].is_boolean());

    let field = score_description("Consulta gratis", None);
    let value = serde_json::to_value(&field).unwrap();
    assert!(value["metrics"]["has_cta"].as_bool().unwrap());
}
