//! Outbound email via the Resend HTTP API.
//!
//! The back office gets a plain-text summary of every submitted inquiry.
//! The quote engine knows nothing about this module; it only ever sees
//! values going in and a `Quote` coming out.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::quote::calculators::QuoteInput;
use crate::quote::requests::ContactRequest;
use crate::quote::responses::Quote;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Everything the admin notification needs, borrowed from the handler.
pub struct QuoteSummary<'a> {
    pub inquiry_id: Uuid,
    pub contact: &'a ContactRequest,
    pub address: &'a str,
    pub input: &'a QuoteInput,
    pub quote: &'a Quote,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}

/// Thin client for the Resend email API.
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
    to: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.resend_api_key.clone(),
            from: config.mail_from.clone(),
            to: config.mail_to.clone(),
        }
    }

    /// Send the admin summary for a submitted inquiry. Without an API key
    /// (local development) the send is skipped with a warning.
    pub async fn send_quote_summary(&self, summary: &QuoteSummary<'_>) -> Result<()> {
        if self.api_key.is_empty() {
            tracing::warn!(
                inquiry_id = %summary.inquiry_id,
                "RESEND_API_KEY not set; skipping admin notification"
            );
            return Ok(());
        }

        let body = SendEmailRequest {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: format!(
                "Neue Kalkulationsanfrage von {} {}",
                summary.contact.vorname.trim(),
                summary.contact.nachname.trim()
            ),
            text: render_summary(summary),
        };

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Resend returned status {}",
                response.status()
            )));
        }

        tracing::info!(inquiry_id = %summary.inquiry_id, "admin notification sent");
        Ok(())
    }
}

fn render_summary(summary: &QuoteSummary<'_>) -> String {
    let contact = summary.contact;
    let input = summary.input;
    let b = &summary.quote.breakdown;

    let mut lines = vec![
        format!("Anfrage {}", summary.inquiry_id),
        format!("Eingegangen: {}", summary.submitted_at.to_rfc3339()),
        String::new(),
        format!("Name: {} {}", contact.vorname.trim(), contact.nachname.trim()),
        format!("E-Mail: {}", contact.email.trim()),
        format!("Telefon: {}", contact.telefon.trim()),
        format!("Wunschtermin: {}", contact.wunschtermin.trim()),
        format!("Adresse: {}", summary.address.trim()),
        String::new(),
        format!("Leistung: {}", input.service.wire_name()),
        format!("Rinnenlänge: {} m", input.linear_meters),
        format!("Traufhöhe: {} m", input.height_meters),
        format!("Anfahrt (einfach): {} km", input.distance_km),
        format!("Laubschutz: {}", if input.guard_requested { "ja" } else { "nein" }),
        String::new(),
        format!("Grundreinigung: {} EUR (Satz {} EUR/m)", b.base, b.rate),
        format!("Anfahrt: {} EUR", b.travel),
        format!("Rüstpauschale: {} EUR", b.setup),
        format!("Schutz Reinigung: {} EUR", b.guard_clean),
        format!("Schutz Montage: {} EUR", b.guard_mount),
        format!("Schutz Demontage: {} EUR", b.guard_demount),
        format!("Steiger: {} EUR", b.steiger),
        format!("Leiter: {} EUR", b.ladder),
        format!("Zwischensumme: {} EUR", b.subtotal),
        format!("Endpreis: {} EUR", summary.quote.total),
    ];
    if b.minimum_applied {
        lines.push("Hinweis: Mindestpreis angewendet.".to_string());
    }
    if !contact.nachricht.trim().is_empty() {
        lines.push(String::new());
        lines.push(format!("Nachricht: {}", contact.nachricht.trim()));
    }
    lines.join("\n")
}
