//! Quote API route handlers
//!
//! Thin glue between the wire and the pure calculator: handlers coerce the
//! form input, call [`calculate_quote`](super::calculators::calculate_quote)
//! and serialize the result. The submission handler additionally recomputes
//! the quote server-side (a client-supplied total is never trusted) and
//! hands the summary to the mail collaborator.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::notify::QuoteSummary;
use crate::quote::calculators::calculate_quote;
use crate::quote::requests::{QuoteRequest, SubmitRequest};
use crate::quote::responses::{HealthResponse, Quote, SubmitResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/quote", post(calculate))
        .route("/api/quote/submit", post(submit))
}

/// Liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true, pong: true })
}

/// Calculate a quote for the embedded form. Called on every input change,
/// so this stays allocation-light and never errors on form content.
async fn calculate(Json(request): Json<QuoteRequest>) -> Json<Quote> {
    let quote = calculate_quote(&request.normalize());
    tracing::debug!(total = %quote.total, "quote calculated");
    Json(quote)
}

/// Accept a quote inquiry: validate the contact, recompute the quote from
/// the submitted form fields and notify the back office by email.
async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    let errors = submission.contact.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join(" ")));
    }

    let input = submission.request.normalize();
    let quote = calculate_quote(&input);
    let inquiry_id = Uuid::new_v4();

    let summary = QuoteSummary {
        inquiry_id,
        contact: &submission.contact,
        address: &submission.adresse,
        input: &input,
        quote: &quote,
        submitted_at: Utc::now(),
    };
    state.mailer.send_quote_summary(&summary).await?;

    tracing::info!(%inquiry_id, total = %quote.total, "quote inquiry submitted");
    Ok(Json(SubmitResponse { ok: true, inquiry_id }))
}
