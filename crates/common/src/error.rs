use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::types::RejectionReason;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Loan application rejected: {}", join_reasons(.0))]
    LoanRejected(Vec<RejectionReason>),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(RejectionReason::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::LoanRejected(reasons) = &self {
            let reasons: Vec<serde_json::Value> = reasons
                .iter()
                .map(|reason| {
                    let mut value = serde_json::to_value(reason).unwrap_or_else(|_| json!({}));
                    value["message"] = json!(reason.message());
                    value
                })
                .collect();
            let body = json!({ "error": self.to_string(), "reasons": reasons });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }

        let (status, message) = match &self {
            AppError::LoanRejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Calculation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Delivery(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejection_status() {
        let err = AppError::LoanRejected(vec![RejectionReason::MissingLoanType]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_rejection_display_joins_messages() {
        let err = AppError::LoanRejected(vec![
            RejectionReason::InvalidAmount,
            RejectionReason::ExceedsCollateralLimit {
                max_loan_amount: dec!(40000),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("valid loan amount"));
        assert!(text.contains("₦40,000.00"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound("loan".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Calculation("term".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Delivery("timeout".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Validation("term_months".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
