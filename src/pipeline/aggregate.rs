use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::pipeline::extract::{ExtractOptions, PaletteExtractor, Swatch};
use crate::pipeline::fetch::MediaFetcher;

/// Fetch and extract every source concurrently and concatenate the swatches.
///
/// A failing or panicking source is logged and contributes nothing; it never
/// affects the other sources. Output follows source order.
pub async fn collect_swatches(
    sources: &[String],
    fetcher: &dyn MediaFetcher,
    extractor: &Arc<dyn PaletteExtractor>,
    timeout: Duration,
    options: ExtractOptions,
) -> Vec<Swatch> {
    let results = join_all(sources.iter().map(|source| {
        AssertUnwindSafe(swatches_from_source(
            source,
            fetcher,
            Arc::clone(extractor),
            timeout,
            options,
        ))
        .catch_unwind()
        .map(|outcome| {
            outcome.unwrap_or_else(|panic| Err(SourceError::Task(super::panic_message(&*panic))))
        })
    }))
    .await;

    let mut swatches = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(found) => {
                debug!(source = %source, count = found.len(), "extracted swatches");
                swatches.extend(found);
            }
            Err(err) => warn!(source = %source, error = %err, "palette extraction failed for source"),
        }
    }
    swatches
}

/// Fetch one source within `timeout`, then run the extractor off the async
/// runtime.
async fn swatches_from_source(
    source: &str,
    fetcher: &dyn MediaFetcher,
    extractor: Arc<dyn PaletteExtractor>,
    timeout: Duration,
    options: ExtractOptions,
) -> Result<Vec<Swatch>, SourceError> {
    let bytes = tokio::time::timeout(timeout, fetcher.fetch(source))
        .await
        .map_err(|_| SourceError::Timeout(timeout))??;

    let slots = tokio::task::spawn_blocking(move || extractor.extract(&bytes, options))
        .await
        .map_err(|err| SourceError::Task(err.to_string()))??;

    Ok(slots.into_swatches())
}
