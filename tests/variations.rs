use adcopy_lab::variation::{
    build_tone_test, variation_label, BaseAdSource, CopySource, GeneratedCopy, PrefetchedSource,
    VariationPlan,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_plan(kinds: &[&str]) -> VariationPlan {
    let mut plan = VariationPlan::new(strings(&["amarres de amor"]), strings(kinds));
    plan.num_headlines = 2;
    plan.num_descriptions = 1;
    plan
}

fn base_source() -> BaseAdSource {
    BaseAdSource::new(
        strings(&[
            "Amarres de Amor Efectivos",
            "Recupera a Tu Pareja Ya",
            "Tarot del Amor",
        ]),
        strings(&["Consulta gratis hoy mismo", "Resultados garantizados"]),
    )
}

#[test]
fn labels_run_a_through_e_then_numbered() {
    assert_eq!(variation_label(0), "A");
    assert_eq!(variation_label(4), "E");
    assert_eq!(variation_label(5), "V6");
    assert_eq!(variation_label(9), "V10");
}

#[test]
fn tone_test_assembles_labeled_variations_in_order() {
    let plan = base_plan(&["emocional", "racional", "urgente"]);
    let mut source = base_source();

    let test = build_tone_test(&plan, &mut source);

    assert_eq!(test.variations.len(), 3);
    assert_eq!(test.variations[0].label, "A");
    assert_eq!(test.variations[0].tone, "emocional");
    assert_eq!(test.variations[1].label, "B");
    // "racional" maps to the generator tone "profesional".
    assert_eq!(test.variations[1].kind, "racional");
    assert_eq!(test.variations[1].tone, "profesional");
    assert_eq!(test.variations[2].tone, "urgente");

    for variation in &test.variations {
        assert_eq!(variation.headlines.len(), 2);
        assert_eq!(variation.descriptions.len(), 1);
    }
    assert!(test.versions.values().all(|version| *version == 1));
    assert!(test.warnings.is_empty());
}

#[test]
fn analysis_measures_lengths_keywords_and_uniqueness() {
    let plan = base_plan(&["emocional", "urgente", "profesional"]);
    let mut source = base_source();

    let test = build_tone_test(&plan, &mut source);
    let analysis = &test.analysis;

    assert_eq!(analysis.total_variations, 3);
    let first = &analysis.by_variation[0];
    // "Amarres de Amor Efectivos" (25) and "Recupera a Tu Pareja Ya" (23).
    assert!((first.avg_headline_length - 24.0).abs() < 1e-6);
    assert_eq!(first.keyword_matches, 1);

    // The base source hands every variation the same copy.
    let unique = &analysis.unique_elements;
    assert_eq!(unique.total_headlines, 6);
    assert_eq!(unique.unique_headlines, 2);
    assert!((unique.uniqueness_rate_headlines - 33.3).abs() < 1e-6);
    assert_eq!(unique.total_descriptions, 3);
    assert_eq!(unique.unique_descriptions, 1);
}

#[test]
fn identical_copy_triggers_the_diversity_recommendation() {
    let plan = base_plan(&["emocional", "urgente"]);
    let mut source = base_source();

    let test = build_tone_test(&plan, &mut source);

    assert!(test.recommendations[0].contains("diversity"));
    assert_eq!(test.recommendations.len(), 5);
}

#[test]
fn missing_copy_skips_the_variation_with_a_warning() {
    let plan = base_plan(&["emocional", "urgente"]);
    let mut source = PrefetchedSource::new();
    source.push(
        "urgente",
        GeneratedCopy {
            headlines: strings(&["Consulta Ahora Mismo"]),
            descriptions: strings(&["Resultados hoy"]),
        },
    );

    let test = build_tone_test(&plan, &mut source);

    assert_eq!(test.variations.len(), 1);
    // Label B belongs to the second requested kind even though A is absent.
    assert_eq!(test.variations[0].label, "B");
    assert_eq!(test.variations[0].tone, "urgente");
    assert_eq!(test.warnings.len(), 1);
    assert!(test.warnings[0].contains("Variation A"));
}

#[test]
fn empty_keyword_list_is_flagged_not_fatal() {
    let mut plan = base_plan(&["emocional"]);
    plan.keywords.clear();
    let mut source = base_source();

    let test = build_tone_test(&plan, &mut source);

    assert_eq!(test.variations.len(), 1);
    assert!(test.warnings.iter().any(|w| w.contains("No keywords")));
}

#[test]
fn regenerate_replaces_copy_and_bumps_the_version() {
    let plan = base_plan(&["emocional"]);
    let mut source = base_source();
    let mut test = build_tone_test(&plan, &mut source);

    let mut replacement = PrefetchedSource::new();
    replacement.push(
        "emocional",
        GeneratedCopy {
            headlines: strings(&["Amor Verdadero Te Espera"]),
            descriptions: strings(&["Recupera la ilusión con ayuda real"]),
        },
    );

    assert!(test.regenerate("A", &mut replacement));
    assert_eq!(
        test.variations[0].headlines,
        strings(&["Amor Verdadero Te Espera"])
    );
    assert_eq!(test.versions["A"], 2);

    // Unknown labels and exhausted sources leave the session untouched.
    assert!(!test.regenerate("Z", &mut replacement));
    assert!(!test.regenerate("A", &mut replacement));
    assert_eq!(test.versions["A"], 2);
}

#[test]
fn base_source_slices_to_the_requested_counts() {
    let mut source = base_source();
    let copy = source.copy_for("emocional", 2, 1).expect("copy");
    assert_eq!(copy.headlines.len(), 2);
    assert_eq!(copy.descriptions.len(), 1);

    // Asking for more than exists returns what is available.
    let copy = source.copy_for("urgente", 10, 10).expect("copy");
    assert_eq!(copy.headlines.len(), 3);
    assert_eq!(copy.descriptions.len(), 2);
}
