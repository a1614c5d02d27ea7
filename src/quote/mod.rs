//! Quote calculation engine for gutter cleaning jobs.
//!
//! The calculator itself ([`calculators`]) is pure and synchronous: fixed
//! rate tables, O(1) arithmetic, no I/O. Everything around it is glue -
//! lenient form deserialization ([`requests`]), wire DTOs ([`responses`])
//! and the axum handlers ([`routes`]).

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{band_price, calculate_quote, round_money, QuoteInput, ServiceType};
pub use responses::{Breakdown, Quote, MIN_PRICE_APPLIED};
pub use routes::router;
