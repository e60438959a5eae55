use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One backend-computed credit score. Every field is optional: the payload is
/// owned by the scoring service and only read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "Yahoo_Ticker", default)]
    pub yahoo_ticker: Option<String>,
    #[serde(rename = "CompanyName_ForNews", default)]
    pub company_name: Option<String>,
    #[serde(rename = "Tier", default)]
    pub tier: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Total_Score", default, deserialize_with = "lenient_number")]
    pub total_score: Option<f64>,

    #[serde(rename = "YoY_Growth", default, deserialize_with = "lenient_number")]
    pub yoy_growth: Option<f64>,
    #[serde(rename = "YoY_Bucket", default)]
    pub yoy_bucket: Option<String>,
    #[serde(rename = "PAT_Margin", default, deserialize_with = "lenient_number")]
    pub pat_margin: Option<f64>,
    #[serde(rename = "PAT_Bucket", default)]
    pub pat_bucket: Option<String>,
    #[serde(rename = "Stock_Return_30D", default, deserialize_with = "lenient_number")]
    pub stock_return_30d: Option<f64>,
    #[serde(rename = "Stock_Bucket", default)]
    pub stock_bucket: Option<String>,
    #[serde(rename = "MarketCap_Crore", default, deserialize_with = "lenient_number")]
    pub market_cap_crore: Option<f64>,
    #[serde(rename = "CFO_PAT_Ratio", default, deserialize_with = "lenient_number")]
    pub cfo_pat_ratio: Option<f64>,
    #[serde(rename = "CFO_PAT_Bucket", default)]
    pub cfo_pat_bucket: Option<String>,
    #[serde(rename = "CFI_Revenue", default, deserialize_with = "lenient_number")]
    pub cfi_revenue: Option<f64>,
    #[serde(rename = "CFI_Bucket", default)]
    pub cfi_bucket: Option<String>,
    // The scoring service emits `Borrowing_Growth_%`; older payloads drop the `%`.
    #[serde(
        rename = "Borrowing_Growth_",
        alias = "Borrowing_Growth_%",
        default,
        deserialize_with = "lenient_number"
    )]
    pub borrowing_growth: Option<f64>,
    #[serde(rename = "Borrowing_Bucket", default)]
    pub borrowing_bucket: Option<String>,
    #[serde(rename = "Event_Score", default, deserialize_with = "lenient_number")]
    pub event_score: Option<f64>,

    #[serde(rename = "Score_YoY_Growth", default, deserialize_with = "lenient_number")]
    pub score_yoy_growth: Option<f64>,
    #[serde(rename = "Score_PAT_Margin", default, deserialize_with = "lenient_number")]
    pub score_pat_margin: Option<f64>,
    #[serde(rename = "Score_CFO_PAT", default, deserialize_with = "lenient_number")]
    pub score_cfo_pat: Option<f64>,
    #[serde(rename = "Score_CFI_Revenue", default, deserialize_with = "lenient_number")]
    pub score_cfi_revenue: Option<f64>,
    #[serde(
        rename = "Score_Borrowing_Growth",
        default,
        deserialize_with = "lenient_number"
    )]
    pub score_borrowing_growth: Option<f64>,
    #[serde(
        rename = "Score_Stock_Return_30D",
        default,
        deserialize_with = "lenient_number"
    )]
    pub score_stock_return_30d: Option<f64>,
}

impl ScoreRecord {
    pub fn rating(&self) -> Rating {
        Rating::from_token(self.rating.as_deref().unwrap_or_default())
    }

    /// Stable list key: the Yahoo ticker when present.
    pub fn list_key(&self) -> Option<&str> {
        self.yahoo_ticker.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Accepts numbers and numeric strings; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
    B,
    C,
    D,
    Unrecognized(String),
}

impl Rating {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "AAA" => Rating::Aaa,
            "AA" => Rating::Aa,
            "A" => Rating::A,
            "BBB" => Rating::Bbb,
            "BB" => Rating::Bb,
            "B" => Rating::B,
            "C" => Rating::C,
            "D" => Rating::D,
            other => Rating::Unrecognized(other.to_string()),
        }
    }

    pub fn tone(&self) -> RatingTone {
        match self {
            Rating::Aaa | Rating::Aa => RatingTone::Strong,
            Rating::A | Rating::Bbb => RatingTone::Moderate,
            Rating::Bb | Rating::B => RatingTone::Weak,
            Rating::C | Rating::D => RatingTone::Distressed,
            Rating::Unrecognized(_) => RatingTone::Unknown,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rating::Aaa => "AAA",
            Rating::Aa => "AA",
            Rating::A => "A",
            Rating::Bbb => "BBB",
            Rating::Bb => "BB",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::Unrecognized(s) if s.is_empty() => NOT_AVAILABLE,
            Rating::Unrecognized(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

/// Colour family used to badge a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTone {
    Strong,
    Moderate,
    Weak,
    Distressed,
    Unknown,
}

impl RatingTone {
    pub fn css_class(self) -> &'static str {
        match self {
            RatingTone::Strong => "tone-strong",
            RatingTone::Moderate => "tone-moderate",
            RatingTone::Weak => "tone-weak",
            RatingTone::Distressed => "tone-distressed",
            RatingTone::Unknown => "tone-unknown",
        }
    }
}

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}
