//! Loan calculator routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use finsavvy_common::error::AppError;
use finsavvy_common::types::{
    AccountSnapshot, ApprovedLoan, Installment, LoanApplication, LoanQuote, LoanType, TermMonths,
};
use finsavvy_engine::amortization::{MAX_SCHEDULE_MONTHS, amortization_schedule};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/loans/products", get(list_products))
        .route("/api/loans/quote", post(quote_loan))
        .route("/api/loans/schedule", post(loan_schedule))
        .route("/api/loans", post(submit_loan))
        .route("/api/loans", get(list_loans))
        .route("/api/loans/{id}", get(get_loan))
}

/// Request body for quote and submit: the form plus the caller's balances.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanRequest {
    pub application: LoanApplication,
    pub account: AccountSnapshot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    /// Any month count from 1 to `MAX_SCHEDULE_MONTHS`, not only the offered terms.
    pub term_months: u32,
}

#[derive(Debug, Serialize)]
pub struct LoanProduct {
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub label: &'static str,
    pub interest_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RiskBands {
    pub low_max_ltv: Decimal,
    pub medium_max_ltv: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<LoanProduct>,
    pub terms: Vec<TermMonths>,
    pub max_loan_to_value: Decimal,
    pub risk_bands: RiskBands,
}

/// GET /api/loans/products — Loan types with their rates, plus the fixed policy.
async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let policy = state.calculator.policy();
    let products = LoanType::ALL
        .iter()
        .map(|&loan_type| LoanProduct {
            loan_type,
            label: loan_type.label(),
            interest_rate: policy.interest_rate(loan_type),
        })
        .collect();

    Json(ProductsResponse {
        products,
        terms: policy.allowed_terms().to_vec(),
        max_loan_to_value: policy.max_loan_to_value_pct,
        risk_bands: RiskBands {
            low_max_ltv: policy.low_risk_max_ltv_pct,
            medium_max_ltv: policy.medium_risk_max_ltv_pct,
        },
    })
}

/// POST /api/loans/quote — Recompute every derived value for the current form.
///
/// Always succeeds; rejections are returned as part of the quote.
async fn quote_loan(
    State(state): State<AppState>,
    Json(req): Json<LoanRequest>,
) -> Json<LoanQuote> {
    Json(state.calculator.quote(&req.application, &req.account))
}

/// POST /api/loans/schedule — Month-by-month amortization table.
async fn loan_schedule(
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<Vec<Installment>>, AppError> {
    if req.term_months > MAX_SCHEDULE_MONTHS {
        return Err(AppError::Validation(format!(
            "term_months must be at most {}",
            MAX_SCHEDULE_MONTHS
        )));
    }

    let schedule = amortization_schedule(req.principal, req.annual_rate_percent, req.term_months)?;
    Ok(Json(schedule))
}

/// POST /api/loans — Submit an application.
///
/// On approval the loan is recorded in the loan book and, when configured,
/// delivered to the webhook in the background.
async fn submit_loan(
    State(state): State<AppState>,
    Json(req): Json<LoanRequest>,
) -> Result<(StatusCode, Json<ApprovedLoan>), AppError> {
    let mut book = state.loans.clone();
    let loan = state
        .calculator
        .submit(&req.application, &req.account, &mut book)?;

    if let Some(notifier) = state.notifier.clone() {
        let delivered = loan.clone();
        tokio::spawn(async move {
            // The loan stays approved whatever happens to delivery.
            if let Err(e) = notifier.deliver(&delivered).await {
                tracing::debug!(loan_id = %delivered.id, error = %e, "Webhook delivery abandoned");
            }
        });
    }

    Ok((StatusCode::CREATED, Json(loan)))
}

/// GET /api/loans — Loans approved since the process started, newest first.
async fn list_loans(State(state): State<AppState>) -> Json<Vec<ApprovedLoan>> {
    Json(state.loans.list())
}

/// GET /api/loans/{id} — A single approved loan.
async fn get_loan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApprovedLoan>, AppError> {
    state
        .loans
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
}
