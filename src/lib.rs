//! Storefront SDK for the TPS Plant Foods headless shop.
//!
//! Provides a high-level client for the three things the storefront needs:
//! reading the product catalog from the commerce GraphQL API, maintaining a
//! durable local shopping cart, and handing the cart off to the external
//! checkout via its form-submission protocol.
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_sdk::StorefrontSdk;
//!
//! let mut sdk = StorefrontSdk::builder().build().unwrap();
//!
//! // Browse the catalog
//! let products = sdk.catalog().fetch_by_category("Houseplant Products");
//!
//! // Add the default variant of the first product
//! if let Some(product) = products.first() {
//!     if let Some(variant) = storefront_sdk::catalog::best_available_variant(product) {
//!         let (product, variant) = (product.clone(), variant.clone());
//!         sdk.cart_mut().add_item(&product, &variant, 1, None);
//!     }
//! }
//!
//! // Hand off to the external checkout
//! sdk.begin_checkout();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod query_builder;
pub mod storage;
pub mod subscriptions;

#[cfg(feature = "async")]
pub use async_client::AsyncStorefrontSdk;
pub use cart::{CartEvent, CartStore, Notification};
pub use catalog::CatalogClient;
pub use checkout::{checkout_fields, CheckoutBridge, FormSubmitter, HttpFormSubmitter};
pub use error::{Result, StorefrontError};
pub use query_builder::ProductQueryBuilder;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use subscriptions::SubscriptionService;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// StorefrontSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StorefrontSdk`] instance.
///
/// Use [`StorefrontSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StorefrontSdkBuilder::build).
pub struct StorefrontSdkBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    api_url: String,
    access_token: String,
    checkout_domain: String,
    timeout: Duration,
}

impl Default for StorefrontSdkBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            api_url: config::STOREFRONT_API_URL.to_string(),
            access_token: config::STOREFRONT_ACCESS_TOKEN.to_string(),
            checkout_domain: config::CHECKOUT_DOMAIN.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl StorefrontSdkBuilder {
    /// Set a custom directory for the persisted cart snapshot.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/storefront-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep cart state in memory only; nothing is written to disk.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Override the catalog GraphQL endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Override the storefront access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Override the external checkout domain.
    pub fn checkout_domain(mut self, domain: impl Into<String>) -> Self {
        self.checkout_domain = domain.into();
        self
    }

    /// Set the HTTP request timeout for catalog and checkout requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, hydrating the cart from its persisted snapshot.
    pub fn build(self) -> Result<StorefrontSdk> {
        let storage: Box<dyn KeyValueStore> = if self.in_memory {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::new(self.data_dir)?)
        };

        let cart = CartStore::new(storage);
        let catalog = CatalogClient::new(self.api_url, self.access_token, self.timeout)?;
        let checkout = CheckoutBridge::new(&self.checkout_domain, self.timeout)?;

        Ok(StorefrontSdk {
            catalog,
            cart,
            checkout,
        })
    }
}

// ---------------------------------------------------------------------------
// StorefrontSdk
// ---------------------------------------------------------------------------

/// The main entry point for the storefront SDK.
///
/// Owns the catalog client, the cart store, and the checkout bridge, and
/// exposes them as borrowing accessors. Created via
/// [`StorefrontSdk::builder()`].
pub struct StorefrontSdk {
    catalog: CatalogClient,
    cart: CartStore,
    checkout: CheckoutBridge,
}

impl StorefrontSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> StorefrontSdkBuilder {
        StorefrontSdkBuilder::default()
    }

    // -- Component accessors ----------------------------------------------

    /// Access the read-only catalog query interface.
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart access for add/remove/update operations.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Access the checkout bridge.
    pub fn checkout(&self) -> &CheckoutBridge {
        &self.checkout
    }

    /// Mutable bridge access, e.g. to install an alert hook.
    pub fn checkout_mut(&mut self) -> &mut CheckoutBridge {
        &mut self.checkout
    }

    /// Build a subscription management client with the given API key.
    pub fn subscriptions(&self, api_key: impl Into<String>) -> Result<SubscriptionService> {
        SubscriptionService::new(api_key)
    }

    // -- Convenience -------------------------------------------------------

    /// Hand the current cart off to the external checkout.
    ///
    /// The cart is left intact; it is the storefront's job to call
    /// [`CartStore::clear_all`] once a completed checkout is confirmed.
    pub fn begin_checkout(&self) {
        self.checkout
            .begin_checkout(self.cart.items(), self.cart.discount_code());
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StorefrontSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = self.cart.totals();
        write!(
            f,
            "StorefrontSdk(items={}, units={}, total={})",
            self.cart.len(),
            totals.item_count,
            totals.total
        )
    }
}
