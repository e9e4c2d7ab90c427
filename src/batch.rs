//! Parallel variation generation: one task per tone, bounded by a worker
//! semaphore, results collected by index so output order matches the
//! requested tone order.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use adcopy_lab::variation::{build_tone_test, tone_for_kind, PrefetchedSource, ToneTest, VariationPlan};

use crate::generator::GeneratorClient;

pub async fn generate_tone_test(
    client: &GeneratorClient,
    plan: &VariationPlan,
    max_workers: usize,
) -> ToneTest {
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut handles = Vec::new();

    for kind in &plan.kinds {
        let tone = tone_for_kind(kind).to_string();
        let client = client.clone();
        let keywords = plan.keywords.clone();
        let semaphore = semaphore.clone();
        let num_headlines = plan.num_headlines;
        let num_descriptions = plan.num_descriptions;
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            debug!(tone = %tone, "generating variation copy");
            let copy = client
                .generate_copy(&keywords, &tone, num_headlines, num_descriptions)
                .await;
            (tone, copy)
        }));
    }

    // Awaiting handles in spawn order keeps the collected copy aligned with
    // the requested tone order regardless of completion order.
    let mut source = PrefetchedSource::new();
    for handle in handles {
        match handle.await {
            Ok((tone, Ok(copy))) => source.push(&tone, copy),
            Ok((tone, Err(err))) => warn!(tone = %tone, error = %err, "variation generation failed"),
            Err(err) => warn!(error = %err, "generation task panicked"),
        }
    }

    build_tone_test(plan, &mut source)
}
