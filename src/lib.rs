//! Exchange normalization layer
//!
//! Generic orders, queries and errors translated to and from the
//! Binance spot/futures and Huobi contract REST APIs:
//! - Order translation and wire-record normalization
//! - HMAC request signing
//! - Exchange error codes adapted to a common taxonomy

pub mod adapters;
pub mod bin_utils;
pub mod config;
pub mod error;

pub use error::AppError;
