//! Image preloading gate.
//!
//! The game may only start once every card image is available. All loads
//! are started together and awaited jointly; the first failure aborts the
//! gate and the remaining loads are dropped unobserved. Loads are plain
//! reads, so abandoning them needs no cleanup.

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::cards::Deck;
use crate::{Error, Result};

#[cfg(feature = "http")]
pub use http::HttpImageLoader;

/// Loads one image.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Resolve once the image at `url` is fully loaded.
    async fn load(&self, url: &str) -> Result<()>;
}

/// Preload progress: `loaded` of `total` images done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub loaded: usize,
    pub total: usize,
}

/// Waits for every card image of a deck.
#[derive(Clone, Debug)]
pub struct AssetGate<L> {
    loader: L,
}

impl<L: ImageLoader> AssetGate<L> {
    /// Create a gate using `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// The underlying loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Load every card image, reporting progress after each success.
    ///
    /// Returns `Error::AssetUnavailable` for the first image that fails.
    /// There is no retry and no timeout.
    pub async fn preload<F>(&self, deck: &Deck, mut on_progress: F) -> Result<()>
    where
        F: FnMut(Progress),
    {
        let total = deck.len();
        let mut pending: FuturesUnordered<_> = deck
            .iter()
            .map(|card| async move { (card.image.as_str(), self.loader.load(&card.image).await) })
            .collect();

        let mut loaded = 0;
        while let Some((url, result)) = pending.next().await {
            match result {
                Ok(()) => {
                    loaded += 1;
                    on_progress(Progress { loaded, total });
                }
                Err(err) => {
                    warn!(url, error = %err, loaded, total, "image failed, aborting preload");
                    return Err(match err {
                        Error::AssetUnavailable { .. } => err,
                        other => Error::AssetUnavailable {
                            url: url.to_string(),
                            cause: other.to_string(),
                        },
                    });
                }
            }
        }

        debug!(total, "all card images loaded");
        Ok(())
    }
}
