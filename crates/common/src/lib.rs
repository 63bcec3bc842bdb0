pub mod config;
pub mod currency;
pub mod error;
pub mod policy;
pub mod types;
