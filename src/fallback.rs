//! Static fallback catalog served when the live API returns too few results.
//!
//! Category listings never surface a fetch error to the shopper; they degrade
//! to this hard-coded product set instead.

use rust_decimal::Decimal;

use crate::models::{Product, Variant};

/// Fallback products for a category. Unknown categories get the houseplant
/// set, matching the storefront's default landing category.
pub fn products_for_category(category: &str) -> Vec<Product> {
    match category {
        "Garden Products" => garden(),
        "Hydrophonic and Aquatic" => hydroponic(),
        "Plant Supplements" => supplements(),
        _ => houseplant(),
    }
}

fn houseplant() -> Vec<Product> {
    vec![
        product(
            "fallback-monstera",
            "Monstera Plant Food",
            "Premium nutrition for Monstera plants",
            "/assets/products/TPS_8oz_Wrap_PNG/TPS_Monstera_8oz_Wrap.png",
            1458,
            4.9,
            true,
            vec![
                variant("var-1", "8 Ounce", 1499, 100),
                variant("var-2", "32 Ounce", 2499, 50),
                variant("var-3", "128 Ounce", 5999, 25),
            ],
        ),
        product(
            "fallback-indoor",
            "Indoor Plant Food",
            "All-purpose indoor plant nutrition",
            "/assets/products/TPS_8oz_Wrap_PNG/TPS_Indoor_8oz_Wrap.png",
            1203,
            4.8,
            true,
            vec![
                variant("var-4", "8 Ounce", 1499, 200),
                variant("var-5", "32 Ounce", 2499, 75),
            ],
        ),
        product(
            "fallback-fiddle",
            "Fiddle Leaf Fig Plant Food",
            "Specialized nutrition for fiddle leaf figs",
            "/assets/products/TPS_8oz_Wrap_PNG/TPS_Fiddle Leaf Fig_8oz_Wrap.png",
            987,
            4.8,
            false,
            vec![variant("var-6", "8 Ounce", 1499, 150)],
        ),
        product(
            "fallback-succulent",
            "Succulent Plant Food",
            "Specialized for succulents and cacti",
            "/assets/products/indoor-plant-food.png",
            854,
            4.7,
            false,
            vec![variant("var-9", "8 Ounce", 1499, 110)],
        ),
        product(
            "fallback-orchid",
            "Orchid Fertilizer",
            "Premium orchid nutrition",
            "/assets/products/indoor-plant-food.png",
            432,
            4.8,
            false,
            vec![variant("var-11", "8 Ounce", 1699, 70)],
        ),
    ]
}

fn garden() -> Vec<Product> {
    vec![
        product(
            "fallback-rose",
            "Rose Fertilizer",
            "Premium nutrition for roses",
            "/assets/products/indoor-plant-food.png",
            892,
            4.8,
            true,
            vec![variant("var-12", "8 Ounce", 1599, 120)],
        ),
        product(
            "fallback-tomato",
            "Tomato Fertilizer",
            "Boost your tomato harvest",
            "/assets/products/indoor-plant-food.png",
            756,
            4.7,
            true,
            vec![variant("var-13", "8 Ounce", 1499, 150)],
        ),
        product(
            "fallback-citrus",
            "Citrus Fertilizer",
            "Perfect for citrus trees",
            "/assets/products/indoor-plant-food.png",
            634,
            4.6,
            false,
            vec![variant("var-14", "8 Ounce", 1799, 90)],
        ),
        product(
            "fallback-lawn",
            "Lawn Fertilizer",
            "Keep your grass green",
            "/assets/products/indoor-plant-food.png",
            523,
            4.5,
            false,
            vec![variant("var-15", "32 Ounce", 1999, 80)],
        ),
    ]
}

fn hydroponic() -> Vec<Product> {
    vec![
        product(
            "fallback-hydroponic",
            "Hydroponic Plant Food",
            "Complete hydroponic nutrition",
            "/assets/products/indoor-plant-food.png",
            345,
            4.7,
            true,
            vec![variant("var-16", "8 Ounce", 1999, 60)],
        ),
        product(
            "fallback-aquatic",
            "Aquatic Plant Fertilizer",
            "Safe for fish and plants",
            "/assets/products/indoor-plant-food.png",
            287,
            4.6,
            false,
            vec![variant("var-17", "8 Ounce", 1699, 45)],
        ),
    ]
}

fn supplements() -> Vec<Product> {
    vec![
        product(
            "fallback-root",
            "Root Supplement",
            "Strengthen root systems",
            "/assets/products/indoor-plant-food.png",
            234,
            4.8,
            true,
            vec![variant("var-18", "8 Ounce", 2199, 40)],
        ),
        product(
            "fallback-bloom",
            "Bloom Booster",
            "Enhance flowering",
            "/assets/products/indoor-plant-food.png",
            189,
            4.7,
            false,
            vec![variant("var-19", "8 Ounce", 1899, 35)],
        ),
    ]
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    reviews: u32,
    rating: f64,
    best_seller: bool,
    variants: Vec<Variant>,
) -> Product {
    let price = variants.first().map(|v| v.price).unwrap_or_default();
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        images: Vec::new(),
        price,
        reviews,
        rating,
        best_seller,
        variants,
        handle: id.to_string(),
        vendor: "TPS Plant Foods".to_string(),
        tags: Vec::new(),
        has_available_variants: true,
    }
}

fn variant(id: &str, title: &str, price_cents: i64, quantity: u32) -> Variant {
    Variant {
        id: id.to_string(),
        title: title.to_string(),
        price: Decimal::new(price_cents, 2),
        compare_at_price: None,
        available: true,
        quantity,
        sku: String::new(),
        options: Vec::new(),
    }
}
