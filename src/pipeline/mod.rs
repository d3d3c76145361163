pub mod aggregate;
pub mod assign;
pub mod contrast;
pub mod extract;
pub mod fetch;
pub mod rank;
pub mod source;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::ThemeError;
use crate::theme::Theme;

use self::aggregate::collect_swatches;
use self::assign::assign_theme;
use self::extract::{KmeansExtractor, PaletteExtractor, Swatch};
use self::fetch::{HttpFetcher, MediaFetcher};
use self::rank::dedup_and_rank;
use self::source::{source_urls, MediaKind};

/// Derives a theme from media using pluggable fetch and extraction
/// collaborators.
pub struct ThemeExtractor {
    fetcher: Arc<dyn MediaFetcher>,
    extractor: Arc<dyn PaletteExtractor>,
    config: Config,
}

impl std::fmt::Debug for ThemeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ThemeExtractor {
    pub fn new(
        fetcher: Arc<dyn MediaFetcher>,
        extractor: Arc<dyn PaletteExtractor>,
        config: Config,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    /// Build with the HTTP/file fetcher and the K-means extractor.
    pub fn from_config(config: Config) -> Result<Self, ThemeError> {
        let fetcher = HttpFetcher::new(config.fetch_timeout(), &config.user_agent)
            .map_err(ThemeError::Client)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(KmeansExtractor), config))
    }

    /// Derive a theme for `reference`. Never fails: any error, including a
    /// panic inside the pipeline, yields the default theme.
    pub async fn extract_theme_color(&self, reference: &str, kind: MediaKind) -> Theme {
        match AssertUnwindSafe(self.try_extract(reference, kind))
            .catch_unwind()
            .await
        {
            Ok(Ok(theme)) => theme,
            Ok(Err(err)) => fallback(reference, &err),
            Err(panic) => fallback(reference, &ThemeError::Panicked(panic_message(&*panic))),
        }
    }

    /// Fallible pipeline: sources, aggregation, ranking, assignment.
    pub async fn try_extract(&self, reference: &str, kind: MediaKind) -> Result<Theme, ThemeError> {
        let sources = source_urls(reference, kind);
        debug!(reference, ?kind, ?sources, "deriving theme");

        let swatches = collect_swatches(
            &sources,
            self.fetcher.as_ref(),
            &self.extractor,
            self.config.fetch_timeout(),
            self.config.extract_options(),
        )
        .await;

        self.theme_from_swatches(&swatches)
    }

    /// Rank already-aggregated swatches and assign the theme colors.
    pub fn theme_from_swatches(&self, swatches: &[Swatch]) -> Result<Theme, ThemeError> {
        let ranked = dedup_and_rank(swatches);
        assign_theme(&ranked, self.config.min_distance)
    }
}

/// Derive a theme with the default configuration.
pub async fn extract_theme_color(reference: &str, kind: MediaKind) -> Theme {
    extract_theme_color_with_config(reference, kind, Config::default()).await
}

/// Derive a theme with the given configuration. Never fails.
pub async fn extract_theme_color_with_config(
    reference: &str,
    kind: MediaKind,
    config: Config,
) -> Theme {
    match ThemeExtractor::from_config(config) {
        Ok(extractor) => extractor.extract_theme_color(reference, kind).await,
        Err(err) => fallback(reference, &err),
    }
}

fn fallback(reference: &str, reason: &ThemeError) -> Theme {
    match reason {
        ThemeError::NoUsableColors => {
            warn!(reference, "no colors extracted, using default theme")
        }
        other => error!(reference, error = %other, "theme extraction failed, using default theme"),
    }
    Theme::default_theme()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
