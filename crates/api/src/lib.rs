//! FinSavvy loan calculator HTTP service.
//!
//! Endpoints:
//! - GET  /health — liveness
//! - GET  /api/loans/products — loan types, rates, terms and risk bands
//! - POST /api/loans/quote — recompute collateral, LTV, risk and payment
//! - POST /api/loans/schedule — month-by-month amortization
//! - POST /api/loans — submit an application
//! - GET  /api/loans, GET /api/loans/{id} — loans approved by this process

pub mod book;
pub mod routes;
pub mod state;
