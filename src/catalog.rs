//! Live catalog queries against the Storefront GraphQL API.
//!
//! A single POST-per-query client with static-token auth. Pagination is
//! cursor-based; callers accumulate pages until exhausted. Category listings
//! degrade to the static fallback catalog rather than surfacing errors.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config;
use crate::error::{Result, StorefrontError};
use crate::fallback;
use crate::models::{GraphQlResponse, Product, ProductConnection, Variant};
use crate::query_builder::ProductQueryBuilder;

/// Pause between successive search-term queries within one category fetch,
/// and between title batches. Keeps the storefront under API rate limits.
const SEARCH_PAUSE: Duration = Duration::from_millis(100);
const BATCH_PAUSE: Duration = Duration::from_millis(200);
const TITLE_BATCH_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// CatalogClient
// ---------------------------------------------------------------------------

/// Read-only client for the commerce catalog.
pub struct CatalogClient {
    client: Client,
    api_url: String,
    access_token: String,
}

impl CatalogClient {
    pub fn new(
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            access_token: access_token.into(),
        })
    }

    /// POST a GraphQL document and return the products connection.
    ///
    /// GraphQL errors in a 200 response are an error; partial data without
    /// errors is trusted as-is.
    fn execute(&self, query: &str) -> Result<ProductConnection> {
        let response = self
            .client
            .post(&self.api_url)
            .header(config::STOREFRONT_TOKEN_HEADER, &self.access_token)
            .json(&serde_json::json!({ "query": query }))
            .send()?
            .error_for_status()?;

        let body: GraphQlResponse = response.json()?;
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                return Err(StorefrontError::GraphQl(messages.join("; ")));
            }
        }
        body.data
            .map(|d| d.products)
            .ok_or_else(|| StorefrontError::GraphQl("response carried no data".to_string()))
    }

    // -- Search ------------------------------------------------------------

    /// Search products by free text, keeping only those with sellable stock.
    pub fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>> {
        let query = ProductQueryBuilder::new()
            .operation("SimpleSearch")
            .search(term)
            .first(limit)
            .build();

        let connection = self.execute(&query)?;
        Ok(map_available(connection))
    }

    /// Fetch the first product matching `name`, if any.
    pub fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>> {
        let query = ProductQueryBuilder::new()
            .operation("SimpleSearch")
            .search(name)
            .first(1)
            .build();

        let connection = self.execute(&query)?;
        Ok(connection
            .edges
            .into_iter()
            .next()
            .map(|edge| Product::from_node(edge.node)))
    }

    /// Fetch products by exact title, in batches of OR-combined title queries.
    ///
    /// A failed batch is logged and skipped; the result is ordered to match
    /// the requested name order as closely as the returned titles allow.
    pub fn fetch_products_by_names(&self, names: &[&str]) -> Result<Vec<Product>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut all = Vec::new();
        for (batch_index, batch) in names.chunks(TITLE_BATCH_SIZE).enumerate() {
            if batch_index > 0 {
                thread::sleep(BATCH_PAUSE);
            }
            let query = ProductQueryBuilder::new()
                .operation("FetchProductsByNames")
                .search_titles(batch)
                .first(TITLE_BATCH_SIZE)
                .build();

            match self.execute(&query) {
                Ok(connection) => all.extend(map_available(connection)),
                Err(e) => {
                    tracing::warn!(batch_index, error = %e, "title batch failed, continuing");
                }
            }
        }

        // Align to the caller's requested order; unmatched titles sink to the end.
        let position = |product: &Product| {
            let lower = product.name.to_lowercase();
            names
                .iter()
                .position(|n| {
                    let n = n.to_lowercase();
                    lower.contains(&n) || n.contains(&lower)
                })
                .unwrap_or(usize::MAX)
        };
        all.sort_by_key(position);
        Ok(all)
    }

    // -- Full catalog ------------------------------------------------------

    /// Walk the catalog with cursor pagination, up to the configured cap.
    pub fn fetch_all_products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut builder = ProductQueryBuilder::new();
            builder
                .operation("GetAllProducts")
                .first(config::CATALOG_PAGE_SIZE);
            if let Some(ref c) = cursor {
                builder.after(c);
            }

            let connection = self.execute(&builder.build())?;
            let has_next = connection.page_info.has_next_page;
            let end_cursor = connection.page_info.end_cursor.clone();
            products.extend(map_available(connection));

            if has_next && products.len() < config::CATALOG_MAX_PRODUCTS {
                cursor = end_cursor;
            } else {
                break;
            }
        }

        Ok(products)
    }

    // -- Category listing --------------------------------------------------

    /// Fetch a category listing, falling back to the static catalog when the
    /// API failed or returned too few results. Never errors.
    pub fn fetch_by_category(&self, category: &str) -> Vec<Product> {
        let terms_map = config::category_search_terms();
        let terms = terms_map
            .get(category)
            .cloned()
            .unwrap_or_else(|| vec!["plant"]);

        let mut found: Vec<Product> = Vec::new();
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                thread::sleep(SEARCH_PAUSE);
            }
            match self.search_products(term, 25) {
                Ok(products) => {
                    tracing::debug!(term, count = products.len(), "category search");
                    found.extend(products);
                }
                Err(e) => {
                    tracing::warn!(term, error = %e, "category search failed, trying next term");
                }
            }
        }

        // De-duplicate by product id, keeping first occurrence.
        let mut unique: Vec<Product> = Vec::new();
        for product in found {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }

        if unique.len() < config::CATEGORY_FALLBACK_THRESHOLD {
            tracing::warn!(
                category,
                found = unique.len(),
                "insufficient live results, serving fallback catalog"
            );
            return fallback::products_for_category(category);
        }

        unique.truncate(config::CATEGORY_MAX_PRODUCTS);
        unique
    }
}

/// Map a connection's nodes to products, keeping only sellable ones.
fn map_available(connection: ProductConnection) -> Vec<Product> {
    connection
        .edges
        .into_iter()
        .map(|edge| Product::from_node(edge.node))
        .filter(|p| p.has_available_variants)
        .collect()
}

// ---------------------------------------------------------------------------
// Availability helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub in_stock: bool,
    pub total_quantity: u32,
    pub available_variants: usize,
    pub total_variants: usize,
}

/// Summarize a product's purchasability across its variants.
pub fn check_availability(product: &Product) -> Availability {
    let available_variants = product.variants.iter().filter(|v| v.available).count();
    let total_quantity: u32 = product.variants.iter().map(|v| v.quantity).sum();
    Availability {
        available: available_variants > 0,
        in_stock: total_quantity > 0,
        total_quantity,
        available_variants,
        total_variants: product.variants.len(),
    }
}

/// Pick the variant a product card should default to: an in-stock 8-ounce
/// size when present, otherwise the cheapest in-stock variant, otherwise
/// the first variant at all.
pub fn best_available_variant(product: &Product) -> Option<&Variant> {
    if product.variants.is_empty() {
        return None;
    }

    let available: Vec<&Variant> = product.variants.iter().filter(|v| v.available).collect();
    if available.is_empty() {
        return product.variants.first();
    }

    if let Some(eight_oz) = available.iter().find(|v| {
        let title = v.title.to_lowercase();
        title.contains("8 oz") || title.contains("8 ounce")
    }) {
        return Some(eight_oz);
    }

    available
        .into_iter()
        .min_by(|a, b| a.price.cmp(&b.price))
}
