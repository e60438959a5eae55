use std::borrow::Borrow;

pub type FaqId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: FaqId,
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        id: 1,
        question: "What is a CredTech credit score?",
        answer: "A single rating from AAA down to D that summarizes a listed company's financial health, built from growth, profitability, cash flow, leverage, recent price action and news sentiment.",
    },
    FaqEntry {
        id: 2,
        question: "Which stocks can I look up?",
        answer: "Any company listed on the National Stock Exchange of India. Type the ticker (for example RELIANCE or TCS); the .NS exchange suffix is added for you.",
    },
    FaqEntry {
        id: 3,
        question: "How are the ratings calculated?",
        answer: "Each metric is bucketed against thresholds that depend on the company's market-cap tier. The bucket points are summed into a total score, and the total maps to a rating grade.",
    },
    FaqEntry {
        id: 4,
        question: "How fresh is the data?",
        answer: "Scores are computed on request from the latest published financial statements, the last 30 days of prices and current news headlines.",
    },
    FaqEntry {
        id: 5,
        question: "Is this investment advice?",
        answer: "No. The rating is an educational summary of public data and should not be the sole basis for any investment decision.",
    },
];

/// Hover/focus driven accordion: at most one entry is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqAccordion {
    entries: &'static [FaqEntry],
    open_id: Option<FaqId>,
}

impl Default for FaqAccordion {
    fn default() -> Self {
        Self::new(FAQ_ENTRIES)
    }
}

impl FaqAccordion {
    pub fn new(entries: &'static [FaqEntry]) -> Self {
        Self {
            entries,
            open_id: None,
        }
    }

    pub fn entries(&self) -> &'static [FaqEntry] {
        self.entries
    }

    pub fn open_id(&self) -> Option<FaqId> {
        self.open_id
    }

    pub fn is_open(&self, id: impl Borrow<FaqId>) -> bool {
        self.open_id == Some(*id.borrow())
    }

    /// Opens `id`, implicitly closing whichever entry was open.
    pub fn hover(&mut self, id: FaqId) {
        if self.entries.iter().any(|entry| entry.id == id) {
            self.open_id = Some(id);
        }
    }

    pub fn focus(&mut self, id: FaqId) {
        self.hover(id);
    }

    pub fn leave(&mut self) {
        self.open_id = None;
    }
}
