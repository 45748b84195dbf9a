//! Daily exchange rates read from dated XML documents.
//!
//! A publisher serves one document per day at `{base}{YYYY}/{MM}/{DD}.xml`,
//! listing `fx` records of `currency_code` and `rate` against its base
//! currency. [`ExchangeRateReader`] fetches those documents and extracts a
//! single rate or a cross rate between two currencies.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;


pub use models::rate::RateDate;
pub use services::document_url::document_url;
pub use services::rate_reader::{find_cross_rate, find_rate, parse_document, ExchangeRateReader};
pub use types::external::{FxDocument, FxRecord};
pub use utils::error::RateError;
