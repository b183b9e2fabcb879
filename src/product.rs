use serde::{Deserialize, Deserializer, Serialize};

/// A candidate offer returned by the assistant backend
///
/// Products arrive either as structured JSON (the `products` and `best_product`
/// fields of a submit response) or scraped out of the markdown table embedded in
/// the reply text. Numeric fields that are missing, null, or unparseable hold
/// `f64::NAN`; renderers must treat that as "no value".
///
/// # Example
///
/// ```rust
/// use buying_assistant::Product;
/// use serde_json::json;
///
/// let product: Product = serde_json::from_value(json!({
///     "title": "Ergonomic Chair 001-1",
///     "price": 249.5,
///     "match_score": 8.75,
///     "availability": "In Stock",
///     "delivery_time": "1-2 days",
///     "category": "Office Chairs",
///     "link": "https://example.com/product/placeholder"
/// })).unwrap();
///
/// assert_eq!(product.price, 249.5);
/// assert!(product.description.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub match_score: f64,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub link: String,
    /// Catalog description, only present on structured products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backend catalog identifier, only present on structured products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

fn not_a_number() -> f64 {
    f64::NAN
}

/// Accepts a number, a numeric string, or null; anything else becomes NaN.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(serde_json::Value::String(s)) => parse_number(&s),
        _ => f64::NAN,
    })
}

/// Parse a decimal cell, yielding NaN on failure.
///
/// Thousands separators are stripped first; the remainder must be a complete
/// number, so trailing text such as `12.5abc` gives NaN rather than a prefix.
pub fn parse_number(text: &str) -> f64 {
    text.trim().replace(',', "").parse::<f64>().unwrap_or(f64::NAN)
}

/// Attributes of the desired purchase extracted by the backend so far
///
/// The backend sends the whole snapshot on every turn and the client replaces its
/// copy wholesale; nothing is merged locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default, deserialize_with = "optional_budget")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

fn optional_budget<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => Some(parse_number(&s)).filter(|b| !b.is_nan()),
        _ => None,
    })
}

impl Context {
    /// True when no attribute has been extracted yet
    pub fn is_empty(&self) -> bool {
        *self == Context::default()
    }
}

/// Whether the best product may be ordered without approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub passes: bool,
    /// Human-readable explanation, empty when the product passes
    pub reason: String,
}
