//! Huobi Contract Services
//!
//! Coin-margined contract order placement over `/api/v1/contract_order`,
//! signed with signature version 2 (base64 HMAC-SHA256).

mod config;
pub mod error_adapter;
mod signing;
mod trade;
pub mod translator;
pub mod types;

pub use config::{HuobiConfig, DEFAULT_BASE_URL, DEFAULT_CONTRACT_TYPE, DEFAULT_LEVER_RATE};
pub use signing::{canonical_payload, signed_request};
pub use trade::{HuobiContractTradeService, CONTRACT_ORDER_PATH};
