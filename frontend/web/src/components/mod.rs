//! Shared building blocks for the prediction page.

pub mod header;
pub mod result_card;

pub use header::Header;
pub use result_card::ResultCards;
