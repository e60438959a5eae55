pub mod score;
pub mod symbol;
