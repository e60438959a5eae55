use crate::domain::score::{format_number, format_percent, RatingTone, ScoreRecord, NOT_AVAILABLE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCardState {
    pub is_expanded: bool,
}

impl ScoreCardState {
    pub fn toggle(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.is_expanded {
            "Hide Details"
        } else {
            "Show More Details"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricView {
    pub label: &'static str,
    pub value: String,
    pub bucket: String,
}

impl MetricView {
    fn new(label: &'static str, value: String, bucket: Option<&str>) -> Self {
        Self {
            label,
            value,
            bucket: bucket.unwrap_or_default().to_string(),
        }
    }
}

/// Everything a rendered score card needs, derived from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCardView {
    pub key: String,
    pub symbol: String,
    pub subtitle: String,
    pub rating: String,
    pub tone: RatingTone,
    pub total_score: String,
    pub headline: Vec<MetricView>,
    pub details: Vec<MetricView>,
    pub state: ScoreCardState,
}

impl ScoreCardView {
    pub fn build(index: usize, record: &ScoreRecord, state: ScoreCardState) -> Self {
        let key = record
            .list_key()
            .map(str::to_string)
            .unwrap_or_else(|| index.to_string());
        let ticker = record.yahoo_ticker.as_deref().unwrap_or(NOT_AVAILABLE);
        let tier = record.tier.as_deref();
        let rating = record.rating();

        let headline = vec![
            MetricView::new(
                "YoY Growth",
                format_percent(record.yoy_growth),
                record.yoy_bucket.as_deref(),
            ),
            MetricView::new(
                "PAT Margin",
                format_percent(record.pat_margin),
                record.pat_bucket.as_deref(),
            ),
            MetricView::new(
                "30D Return",
                format_percent(record.stock_return_30d),
                record.stock_bucket.as_deref(),
            ),
        ];

        let details = vec![
            MetricView::new("Market Cap (Cr)", format_number(record.market_cap_crore), tier),
            MetricView::new(
                "CFO/PAT Ratio",
                format_number(record.cfo_pat_ratio),
                record.cfo_pat_bucket.as_deref(),
            ),
            MetricView::new(
                "CFI/Revenue",
                format_number(record.cfi_revenue),
                record.cfi_bucket.as_deref(),
            ),
            MetricView::new(
                "Borrowing Growth",
                format_percent(record.borrowing_growth),
                record.borrowing_bucket.as_deref(),
            ),
            MetricView::new("Event Score", format_number(record.event_score), None),
        ];

        Self {
            key,
            symbol: record
                .symbol
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            subtitle: format!("{ticker} - {} Cap", tier.unwrap_or(NOT_AVAILABLE)),
            rating: rating.to_string(),
            tone: rating.tone(),
            total_score: format_number(record.total_score),
            headline,
            details,
            state,
        }
    }

    pub fn tone_class(&self) -> &'static str {
        self.tone.css_class()
    }

    pub fn toggle_label(&self) -> &'static str {
        self.state.toggle_label()
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded
    }
}

/// Builds one card per record, each with fresh (collapsed) state.
pub fn build_cards(records: &[ScoreRecord]) -> Vec<ScoreCardView> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ScoreCardView::build(index, record, ScoreCardState::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reliance() -> ScoreRecord {
        ScoreRecord {
            symbol: Some("RELIANCE".into()),
            yahoo_ticker: Some("RELIANCE.NS".into()),
            tier: Some("Large".into()),
            rating: Some("AA".into()),
            total_score: Some(9.0),
            yoy_growth: Some(2.65),
            yoy_bucket: Some(">2%".into()),
            market_cap_crore: Some(1_930_000.5),
            borrowing_growth: Some(4.2),
            ..Default::default()
        }
    }

    #[test]
    fn derives_card_fields_from_record() {
        let card = ScoreCardView::build(0, &reliance(), ScoreCardState::default());
        assert_eq!(card.key, "RELIANCE.NS");
        assert_eq!(card.symbol, "RELIANCE");
        assert_eq!(card.subtitle, "RELIANCE.NS - Large Cap");
        assert_eq!(card.rating, "AA");
        assert_eq!(card.tone_class(), "tone-strong");
        assert_eq!(card.total_score, "9");

        assert_eq!(card.headline[0].value, "2.65%");
        assert_eq!(card.headline[0].bucket, ">2%");
        assert_eq!(card.headline[1].value, "N/A");

        assert_eq!(card.details[0].label, "Market Cap (Cr)");
        assert_eq!(card.details[0].bucket, "Large");
        assert_eq!(card.details[3].value, "4.2%");
        assert_eq!(card.details[4].bucket, "");
    }

    #[test]
    fn falls_back_to_index_key_and_na_fields() {
        let card = ScoreCardView::build(3, &ScoreRecord::default(), ScoreCardState::default());
        assert_eq!(card.key, "3");
        assert_eq!(card.symbol, "N/A");
        assert_eq!(card.rating, "N/A");
        assert_eq!(card.tone_class(), "tone-unknown");
        assert_eq!(card.total_score, "N/A");
    }

    #[test]
    fn cards_expand_independently() {
        let mut cards = build_cards(&[reliance(), reliance()]);
        assert!(cards.iter().all(|c| !c.is_expanded()));
        assert_eq!(cards[0].toggle_label(), "Show More Details");

        cards[0].state.toggle();
        assert!(cards[0].is_expanded());
        assert!(!cards[1].is_expanded());
        assert_eq!(cards[0].toggle_label(), "Hide Details");

        cards[0].state.toggle();
        assert!(!cards[0].is_expanded());
    }
}
