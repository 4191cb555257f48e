//! Async wrapper around [`StorefrontSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Catalog queries and checkout submissions block on network I/O, so this
//! wrapper is the right shape for request handlers and UI runtimes.
//!
//! # Example
//!
//! ```no_run
//! # use storefront_sdk::AsyncStorefrontSdk;
//! # async fn example() -> storefront_sdk::Result<()> {
//! let sdk = AsyncStorefrontSdk::builder().build().await?;
//!
//! // Run any sync SDK method via closure
//! let products = sdk
//!     .run(|s| Ok(s.catalog().fetch_by_category("Garden Products")))
//!     .await?;
//!
//! // Convenience wrapper for totals
//! let totals = sdk.totals().await?;
//! println!("{} products, {} units in cart", products.len(), totals.item_count);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Result, StorefrontError};
use crate::models::{CartTotals, Product};
use crate::StorefrontSdk;

// ---------------------------------------------------------------------------
// AsyncStorefrontSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStorefrontSdk`] instance.
pub struct AsyncStorefrontSdkBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    api_url: Option<String>,
    access_token: Option<String>,
    checkout_domain: Option<String>,
    timeout: Duration,
}

impl Default for AsyncStorefrontSdkBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            api_url: None,
            access_token: None,
            checkout_domain: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncStorefrontSdkBuilder {
    /// Set a custom directory for the persisted cart snapshot.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep cart state in memory only.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Override the catalog GraphQL endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Override the storefront access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the external checkout domain.
    pub fn checkout_domain(mut self, domain: impl Into<String>) -> Self {
        self.checkout_domain = Some(domain.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization (including cart hydration from disk) runs on the
    /// blocking thread pool so it won't block the async event loop.
    pub async fn build(self) -> Result<AsyncStorefrontSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = StorefrontSdk::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if self.in_memory {
                builder = builder.in_memory();
            }
            if let Some(url) = self.api_url {
                builder = builder.api_url(url);
            }
            if let Some(token) = self.access_token {
                builder = builder.access_token(token);
            }
            if let Some(domain) = self.checkout_domain {
                builder = builder.checkout_domain(domain);
            }
            builder = builder.timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncStorefrontSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| StorefrontError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncStorefrontSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`StorefrontSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`StorefrontSdk`] is
/// protected by a [`Mutex`], which also linearizes cart mutations across
/// concurrent callers.
pub struct AsyncStorefrontSdk {
    inner: Arc<Mutex<StorefrontSdk>>,
}

impl AsyncStorefrontSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncStorefrontSdkBuilder {
        AsyncStorefrontSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut StorefrontSdk` and should return a
    /// `Result<T>`. The whole closure holds the SDK lock, so a read and a
    /// dependent write inside one closure cannot interleave with other
    /// callers.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StorefrontSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .lock()
                .map_err(|_| StorefrontError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorefrontError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch a category listing asynchronously.
    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let category = category.to_string();
        self.run(move |s| Ok(s.catalog().fetch_by_category(&category)))
            .await
    }

    /// Current derived cart totals.
    pub async fn totals(&self) -> Result<CartTotals> {
        self.run(|s| Ok(s.cart().totals())).await
    }

    /// Hand the current cart off to the external checkout.
    pub async fn begin_checkout(&self) -> Result<()> {
        self.run(|s| {
            s.begin_checkout();
            Ok(())
        })
        .await
    }
}
