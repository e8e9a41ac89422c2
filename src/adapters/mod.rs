//! Exchange adapters for Binance and Huobi
//!
//! Each exchange exposes a trading facade (`TradeService`) that translates
//! generic orders into the exchange wire format, signs the request, and
//! normalizes replies and faults back into the shared model.

pub mod errors;
pub mod params;
pub mod shared;
pub mod signing;
#[cfg(test)]
pub mod test_utils;
pub mod traits;
pub mod transport;
pub mod types;

pub mod binance;
pub mod huobi;

// Re-export commonly used types for convenience
pub use errors::{CommonError, CommonErrorKind, ExchangeError, ExchangeResult, TransportError};
pub use signing::{HmacSha256Base64, HmacSha256Hex, SignatureProvider};
pub use traits::{MarketDataService, TradeService};
pub use transport::{HttpTransport, RestRequest, RestResponse, RestTransport};
pub use types::{
    Credentials, CurrencyPair, OpenOrders, Order, OrderBook, OrderFlag, OrderKind, OrderSide,
    OrderStatus, OrderType, TimeInForce, UserTrade, UserTrades,
};
pub use binance::{BinanceConfig, BinanceTradeService};
pub use huobi::{HuobiConfig, HuobiContractTradeService};
