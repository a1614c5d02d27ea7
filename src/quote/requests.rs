//! Request DTOs for the quote API.
//!
//! The calculator form is embedded cross-origin and its fields arrive in
//! whatever shape the browser produced, so deserialization is deliberately
//! lenient: missing or non-numeric numeric fields coerce to zero, an unknown
//! service type falls back to first clean, and nothing is ever rejected.
//! Normalization happens in one place ([`QuoteRequest::normalize`]) so the
//! calculator itself stays free of conditionals for missing data.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::quote::calculators::{QuoteInput, ServiceType};

/// Raw calculator form input using the legacy wire vocabulary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub typ: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub lfm: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub hoehe: Decimal,
    #[serde(alias = "km_einfach", alias = "kmEinfach", deserialize_with = "lenient_decimal")]
    pub km: Decimal,
    #[serde(deserialize_with = "lenient_flag")]
    pub schutz: bool,
    #[serde(deserialize_with = "lenient_decimal")]
    pub schutz_clean: Decimal,
    #[serde(alias = "schutzMont", deserialize_with = "lenient_decimal")]
    pub schutz_mont: Decimal,
    #[serde(alias = "schutzDemont", deserialize_with = "lenient_decimal")]
    pub schutz_demont: Decimal,
}

impl QuoteRequest {
    /// Produce the fully-defaulted calculation input: negative footage and
    /// distance clamp to zero, and guard footages are zeroed outright when no
    /// guard work is requested, regardless of what the form supplied.
    pub fn normalize(&self) -> QuoteInput {
        let guard = self.schutz;
        let guard_meters = |value: Decimal| if guard { clamp(value) } else { Decimal::ZERO };

        QuoteInput {
            service: ServiceType::from_wire(&self.typ),
            linear_meters: clamp(self.lfm),
            height_meters: clamp(self.hoehe),
            distance_km: clamp(self.km),
            guard_requested: guard,
            guard_clean_meters: guard_meters(self.schutz_clean),
            guard_mount_meters: guard_meters(self.schutz_mont),
            guard_demount_meters: guard_meters(self.schutz_demont),
        }
    }
}

fn clamp(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Coerce any JSON value to a `Decimal`: numbers pass through, numeric
/// strings parse, everything else (null, objects, garbage text) is zero.
fn coerce_decimal(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).and_then(Decimal::from_f64),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                Decimal::from_str(trimmed).ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .and_then(Decimal::from_f64)
                })
            }
        }
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_decimal(value.as_ref()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// The guard flag is set by a literal `true` or the string "ja"
/// (case-insensitive); anything else means no guard work.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("ja"),
        _ => false,
    })
}

/// Contact details accompanying a quote submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub vorname: String,
    #[serde(default)]
    pub nachname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub nachricht: String,
    #[serde(default)]
    pub wunschtermin: String,
}

impl ContactRequest {
    /// Validate the minimum contact data needed to answer an inquiry.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !is_plausible_email(self.email.trim()) {
            errors.push("Bitte geben Sie eine gültige E-Mail-Adresse an.".to_string());
        }
        if self.vorname.trim().is_empty() {
            errors.push("Bitte geben Sie Ihren Vornamen an.".to_string());
        }
        if self.nachname.trim().is_empty() {
            errors.push("Bitte geben Sie Ihren Nachnamen an.".to_string());
        }
        errors
    }
}

fn is_plausible_email(raw: &str) -> bool {
    let mut parts = raw.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// A quote submission: contact details plus the calculator form fields.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub contact: ContactRequest,
    #[serde(default)]
    pub adresse: String,
    #[serde(flatten)]
    pub request: QuoteRequest,
}
