use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — The mapped catalog product used by the storefront
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Primary image URL, first of `images` or a placeholder.
    pub image: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Price of the default variant.
    pub price: Decimal,
    /// Demo-only review count and rating, generated at map time.
    pub reviews: u32,
    pub rating: f64,
    pub best_seller: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub handle: String,
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub has_available_variants: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub available: bool,
    /// Available stock; 0 when the API reported none or the field was absent.
    pub quantity: u32,
    pub sku: String,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

pub const PLACEHOLDER_IMAGE: &str = "/assets/products/placeholder.png";

impl Product {
    /// Map a raw Storefront API product node into the storefront shape.
    ///
    /// Variant availability requires both the `availableForSale` flag and a
    /// positive reported stock. Review count and rating are demo values.
    pub fn from_node(node: ProductNode) -> Product {
        let images: Vec<ProductImage> = node
            .images
            .edges
            .into_iter()
            .map(|edge| {
                let n = edge.node;
                let url = if n.transformed_src.starts_with("http") {
                    n.transformed_src
                } else {
                    format!("https:{}", n.transformed_src)
                };
                ProductImage {
                    id: n.id,
                    url,
                    alt: n.alt_text.unwrap_or_else(|| node.title.clone()),
                    width: n.width,
                    height: n.height,
                }
            })
            .collect();

        let variants: Vec<Variant> = node
            .variants
            .edges
            .into_iter()
            .map(|edge| {
                let v = edge.node;
                let quantity = v.quantity_available.unwrap_or(0).max(0) as u32;
                Variant {
                    id: v.id,
                    title: v.title,
                    price: parse_amount(&v.price.amount),
                    compare_at_price: v.compare_at_price.map(|p| parse_amount(&p.amount)),
                    available: v.available_for_sale && quantity > 0,
                    quantity,
                    sku: v.sku.unwrap_or_default(),
                    options: v.selected_options,
                }
            })
            .collect();

        let has_available_variants = variants.iter().any(|v| v.available);
        let default_variant = variants
            .iter()
            .find(|v| v.available)
            .or_else(|| variants.first());
        let price = default_variant
            .map(|v| v.price)
            .unwrap_or_else(|| parse_amount(&node.price_range.min_variant_price.amount));

        let best_seller = node.tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            tag.contains("best") && tag.contains("seller")
        });

        let mut rng = rand::thread_rng();
        let reviews = rng.gen_range(50..1550);
        let rating = (rng.gen_range(4.0..5.0_f64) * 10.0).round() / 10.0;

        let image = images
            .first()
            .map(|i| i.url.clone())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Product {
            id: node.id,
            name: node.title,
            description: node.description.unwrap_or_else(|| "PLANT FOOD".to_string()),
            image,
            images,
            price,
            reviews,
            rating,
            best_seller,
            variants,
            handle: node.handle,
            vendor: node.vendor,
            tags: node.tags,
            has_available_variants,
        }
    }
}

fn parse_amount(amount: &str) -> Decimal {
    amount.parse().unwrap_or_else(|_| {
        tracing::warn!(amount, "unparseable price amount, defaulting to zero");
        Decimal::ZERO
    })
}

// ---------------------------------------------------------------------------
// Wire tree — Raw Storefront API response (camelCase, edges/nodes/pageInfo)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<ProductsData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub page_info: PageInfo,
    pub edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdge {
    pub node: ProductNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub handle: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub price_range: PriceRange,
    pub images: ImageConnection,
    pub variants: VariantConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: MoneyV2,
    pub max_variant_price: MoneyV2,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageConnection {
    #[serde(default)]
    pub edges: Vec<ImageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct ImageEdge {
    pub node: ImageNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub id: String,
    pub transformed_src: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VariantConnection {
    #[serde(default)]
    pub edges: Vec<VariantEdge>,
}

#[derive(Debug, Deserialize)]
pub struct VariantEdge {
    pub node: VariantNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    pub price: MoneyV2,
    pub compare_at_price: Option<MoneyV2>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}
