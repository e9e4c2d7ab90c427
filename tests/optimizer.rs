use adcopy_lab::char_len;
use adcopy_lab::optimizer::{optimize_description, optimize_headline, DEFAULT_TARGET_SCORE};
use adcopy_lab::rules;

#[test]
fn over_limit_headline_is_truncated_at_a_word_boundary() {
    let result = optimize_headline(
        "Recupera a tu pareja con un ritual de magia blanca",
        None,
        DEFAULT_TARGET_SCORE,
    );

    assert_eq!(result.optimized, "Recupera a tu pareja con un");
    assert!(char_len(&result.optimized) <= rules::HEADLINE_MAX);
    assert!(result.changed);
    assert!(result.meets_target);
    assert!((result.initial_score - 7.0).abs() < 1e-6);
    assert!((result.final_score - 10.0).abs() < 1e-6);
    assert!((result.improvement - 3.0).abs() < 1e-6);
    assert_eq!(result.improvements_applied.len(), 1);
}

#[test]
fn headline_meeting_target_is_returned_unchanged() {
    let result = optimize_headline("Consulta Tarot Gratis Ahora", None, DEFAULT_TARGET_SCORE);

    assert!(!result.changed);
    assert!(result.meets_target);
    assert_eq!(result.original, result.optimized);
    assert!(result.improvements_applied.is_empty());
    assert!((result.improvement - 0.0).abs() < 1e-6);
    assert!((result.final_score - result.initial_score).abs() < 1e-6);
}

#[test]
fn optimizing_twice_is_a_no_op_once_target_is_met() {
    let first = optimize_headline("AMARRES DE AMOR GARANTIZADOS!!", None, DEFAULT_TARGET_SCORE);
    assert!(first.meets_target);

    let second = optimize_headline(&first.optimized, None, DEFAULT_TARGET_SCORE);
    assert!(!second.changed);
    assert_eq!(second.optimized, first.optimized);
}

#[test]
fn shouting_headline_is_cleaned_up() {
    let result = optimize_headline("AMARRES DE AMOR GARANTIZADOS!!", None, DEFAULT_TARGET_SCORE);

    assert_eq!(result.optimized, "Amarres De Amor Garantizados");
    assert!((result.initial_score - 6.5).abs() < 1e-6);
    assert!((result.final_score - 10.0).abs() < 1e-6);
    assert!(result.changed);
    assert!(result.meets_target);
    assert_eq!(result.improvements_applied.len(), 2);
}

#[test]
fn weak_short_headline_gets_the_power_word_filler() {
    let result = optimize_headline("Tarot del Amor", None, 9.0);

    assert_eq!(result.optimized, "Tarot del Amor Efectivo");
    assert!(result.meets_target);
    assert!(result
        .improvements_applied
        .iter()
        .any(|entry| entry.contains(rules::HEADLINE_FILLER)));
}

#[test]
fn banned_phrases_are_removed_case_insensitively() {
    let result = optimize_headline("Tarot Milagro Nunca Falla", None, DEFAULT_TARGET_SCORE);

    assert_eq!(result.optimized, "Tarot Efectivo");
    assert!((result.initial_score - 5.0).abs() < 1e-6);
    assert!((result.final_score - 9.0).abs() < 1e-6);
    assert_eq!(
        result
            .improvements_applied
            .iter()
            .filter(|entry| entry.contains("banned phrase"))
            .count(),
        2
    );
}

#[test]
fn description_punctuation_is_replaced_with_periods() {
    let result =
        optimize_description("CONSULTA GRATIS AHORA MISMO!!!!", None, DEFAULT_TARGET_SCORE);

    assert_eq!(result.optimized, "Consulta gratis ahora mismo....");
    assert!((result.initial_score - 6.5).abs() < 1e-6);
    assert!((result.final_score - 9.6).abs() < 1e-6);
    assert!(result.meets_target);
}

#[test]
fn description_without_cta_gets_the_filler() {
    let result = optimize_description("Recupera tu relación pronto", None, 9.0);

    assert_eq!(
        result.optimized,
        "Recupera tu relación pronto Consulta ahora."
    );
    assert!(result.meets_target);
    assert!(result
        .improvements_applied
        .iter()
        .any(|entry| entry.contains(rules::DESCRIPTION_FILLER)));
}

#[test]
fn optimizer_output_respects_hard_limits() {
    let long_headline =
        "Amarres de amor con rituales ancestrales para recuperar a tu pareja cuanto antes";
    let result = optimize_headline(long_headline, None, DEFAULT_TARGET_SCORE);
    assert!(result.changed);
    assert!(char_len(&result.optimized) <= rules::HEADLINE_MAX);

    let long_description = "Amarres de amor con magia blanca para recuperar a tu pareja en pocos dias con rituales poderosos y atencion personalizada de una maestra espiritual";
    let result = optimize_description(long_description, None, DEFAULT_TARGET_SCORE);
    assert!(result.changed);
    assert!(char_len(&result.optimized) <= rules::DESCRIPTION_MAX);
}

#[test]
fn unfixable_field_reports_missed_target_honestly() {
    // Nothing structural to fix: in-range length, CTA already present, no
    // banned content. The pass applies nothing and still misses the target;
    // that is reported, not hidden.
    let result = optimize_description("Consulta tarot", None, 10.0);

    assert!(!result.meets_target);
    assert!(!result.changed);
    assert!((result.improvement - 0.0).abs() < 1e-6);
    assert!((result.final_score - 9.0).abs() < 1e-6);
}
