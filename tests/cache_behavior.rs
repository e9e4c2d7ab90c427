use std::sync::Arc;
use std::thread;

use adcopy_lab::cache::ScoreCache;
use adcopy_lab::scoring::{score_description, score_headline};

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn cache_hit_matches_a_cold_score() {
    let cache = ScoreCache::new();

    let cold = score_headline("Amarres de Amor Efectivos", None);
    let first = cache.score_headline("Amarres de Amor Efectivos", None);
    let second = cache.score_headline("Amarres de Amor Efectivos", None);

    assert_eq!(cold, first);
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn field_kind_and_keywords_key_separate_entries() {
    let cache = ScoreCache::new();
    let keywords = kw(&["amarres de amor"]);

    cache.score_headline("Consulta gratis hoy", None);
    cache.score_description("Consulta gratis hoy", None);
    cache.score_headline("Consulta gratis hoy", Some(&keywords));

    assert_eq!(cache.len(), 3);

    let cached = cache.score_description("Consulta gratis hoy", None);
    assert_eq!(cached, score_description("Consulta gratis hoy", None));
    assert_eq!(cache.len(), 3);
}

#[test]
fn concurrent_scoring_of_one_key_stays_consistent() {
    let cache = Arc::new(ScoreCache::new());
    let expected = score_headline("Recupera a Tu Pareja Ya", None);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.score_headline("Recupera a Tu Pareja Ya", None))
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("scoring thread panicked");
        assert_eq!(result, expected);
    }
    assert_eq!(cache.len(), 1);
}
