//! Response DTOs for the quote API.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Warning tag emitted when the price floor overrides the computed subtotal.
pub const MIN_PRICE_APPLIED: &str = "MIN_PRICE_APPLIED";

/// Itemized quote components. Every monetary sub-amount is rounded to two
/// decimal places independently before it lands here; the pre-floor subtotal
/// is kept even when the minimum price overrides the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub travel: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub setup: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub guard_clean: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub guard_mount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub guard_demount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub steiger: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ladder: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    pub minimum_applied: bool,
}

/// A complete priced quote. Constructed fresh on every calculation and never
/// mutated afterwards; it carries no identity beyond its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub breakdown: Breakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Response for a submitted quote inquiry
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub inquiry_id: Uuid,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub pong: bool,
}
