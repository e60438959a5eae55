//! View state for the site's presentational components. Each instance owns
//! its fields; nothing here is global.

pub mod faq;
pub mod navbar;
pub mod route;
pub mod score_card;
