use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Storefront GraphQL endpoint and its public client-side access token.
///
/// The token is a storefront (browser-visible) credential, not an admin
/// secret; it only grants read access to the published catalog.
pub const STOREFRONT_API_URL: &str =
    "https://n3mpgz-ny.myshopify.com/api/2023-01/graphql.json";
pub const STOREFRONT_ACCESS_TOKEN: &str = "d5720278d38b25e4bc1118b31ff0f045";
pub const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// External checkout domain and the paths driven by the handoff protocol.
pub const CHECKOUT_DOMAIN: &str = "https://checkout.tpsplantfoods.com";
pub const CHECKOUT_CLEAR_PATH: &str = "/cart/clear";
pub const CHECKOUT_ADD_PATH: &str = "/cart/add";
pub const CHECKOUT_RETURN_TO: &str = "/checkout";

/// Marker sent as the top-level `checkout_type` field when any line item
/// carries subscription terms.
pub const SUBSCRIPTION_CHECKOUT_TYPE: &str = "subscription";

/// Subscription management API (key supplied by the caller, never compiled in).
pub const SUBSCRIPTION_API_URL: &str = "https://api.rechargeapps.com";
pub const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Recharge-Access-Token";

/// Promotional rate sent as `discount_percentage` on subscription checkout
/// properties. Fixed, independent of each item's own discount percent.
pub const SUBSCRIPTION_DISCOUNT_PERCENT: &str = "15";

/// Storage keys for the persisted cart snapshot and pending discount code.
pub const CART_KEY: &str = "cart";
pub const DISCOUNT_KEY: &str = "bundleDiscount";

/// Quantity cap applied when a variant's available stock is unknown.
pub const MAX_QUANTITY_FALLBACK: u32 = 999;

/// Pause between the remote cart clear and the add-items submission.
/// The clear is fire-and-forget; this delay is all that gates the add.
pub const CLEAR_CART_DELAY: Duration = Duration::from_millis(500);

/// Default HTTP timeout for catalog and checkout requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Page caps used by catalog fetches.
pub const CATALOG_PAGE_SIZE: usize = 50;
pub const CATALOG_MAX_PRODUCTS: usize = 100;
pub const CATEGORY_MAX_PRODUCTS: usize = 20;

/// Minimum number of live results before a category listing gives up on the
/// API and serves the static fallback catalog instead.
pub const CATEGORY_FALLBACK_THRESHOLD: usize = 5;

pub fn category_search_terms() -> HashMap<&'static str, Vec<&'static str>> {
    HashMap::from([
        (
            "Houseplant Products",
            vec!["plant", "indoor", "houseplant"],
        ),
        (
            "Garden Products",
            vec!["fertilizer", "garden", "outdoor"],
        ),
        (
            "Hydrophonic and Aquatic",
            vec!["hydroponic", "aquatic", "water"],
        ),
        (
            "Plant Supplements",
            vec!["supplement", "nutrient", "booster"],
        ),
    ])
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("storefront-sdk")
    } else {
        PathBuf::from(".storefront-sdk-data")
    }
}
