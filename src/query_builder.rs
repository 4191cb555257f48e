//! GraphQL document builder for Storefront API product queries.
//!
//! All user-supplied values (search terms, cursors, titles) are escaped
//! before interpolation into the query string. Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use storefront_sdk::ProductQueryBuilder;
//! let query = ProductQueryBuilder::new()
//!     .search("plant")
//!     .first(25)
//!     .build();
//! ```

/// Builds product query documents for the Storefront GraphQL endpoint.
///
/// The selection set is fixed to the fields the catalog mapper consumes:
/// page info, product metadata, price range, images, and variants.
pub struct ProductQueryBuilder {
    operation: String,
    first: usize,
    after: Option<String>,
    search: Option<String>,
    images_first: usize,
    variants_first: usize,
}

impl Default for ProductQueryBuilder {
    fn default() -> Self {
        Self {
            operation: "Products".to_string(),
            first: 50,
            after: None,
            search: None,
            images_first: 5,
            variants_first: 20,
        }
    }
}

impl ProductQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GraphQL operation name.
    pub fn operation(&mut self, name: &str) -> &mut Self {
        self.operation = name.to_string();
        self
    }

    /// Set the page size (the `first:` argument).
    pub fn first(&mut self, n: usize) -> &mut Self {
        self.first = n;
        self
    }

    /// Set the pagination cursor (the `after:` argument).
    pub fn after(&mut self, cursor: &str) -> &mut Self {
        self.after = Some(cursor.to_string());
        self
    }

    /// Set a free-text search term (the `query:` argument).
    pub fn search(&mut self, term: &str) -> &mut Self {
        self.search = Some(escape_string(term));
        self
    }

    /// Search for exact titles, OR-combined: `title:"A" OR title:"B"`.
    ///
    /// Each title is escaped before being embedded in the search expression.
    pub fn search_titles(&mut self, titles: &[&str]) -> &mut Self {
        let expr = titles
            .iter()
            .map(|t| format!("title:\\\"{}\\\"", escape_string(t)))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.search = Some(expr);
        self
    }

    /// Set how many images to request per product.
    pub fn images_first(&mut self, n: usize) -> &mut Self {
        self.images_first = n;
        self
    }

    /// Set how many variants to request per product.
    pub fn variants_first(&mut self, n: usize) -> &mut Self {
        self.variants_first = n;
        self
    }

    /// Build the final GraphQL document.
    pub fn build(&self) -> String {
        let mut args = vec![format!("first: {}", self.first)];
        if let Some(ref cursor) = self.after {
            args.push(format!("after: \"{}\"", escape_string(cursor)));
        }
        if let Some(ref search) = self.search {
            // Already escaped on entry; escaping again would double the
            // backslashes in title:\"...\" expressions.
            args.push(format!("query: \"{}\"", search));
        }

        format!(
            r#"query {op} {{
  products({args}) {{
    pageInfo {{
      hasNextPage
      endCursor
    }}
    edges {{
      node {{
        id
        title
        description
        handle
        productType
        vendor
        tags
        priceRange {{
          minVariantPrice {{ amount currencyCode }}
          maxVariantPrice {{ amount currencyCode }}
        }}
        images(first: {images}) {{
          edges {{
            node {{ id transformedSrc altText width height }}
          }}
        }}
        variants(first: {variants}) {{
          edges {{
            node {{
              id
              title
              sku
              availableForSale
              quantityAvailable
              price {{ amount currencyCode }}
              compareAtPrice {{ amount currencyCode }}
              selectedOptions {{ name value }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
            op = self.operation,
            args = args.join(", "),
            images = self.images_first,
            variants = self.variants_first,
        )
    }
}

/// Escape a string for embedding inside a double-quoted GraphQL value.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
