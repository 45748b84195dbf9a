use reqwest::Client;
use tracing::debug;

use crate::models::rate::RateDate;
use crate::services::document_url::document_url;
use crate::types::external::{FxDocument, FxRecord};
use crate::utils::error::RateError;

/// Reads daily rate documents published under a fixed base URL.
///
/// Rates in a document are quoted per one unit of the publisher's base
/// currency (the Euro for the usual sources). The reader keeps no per-request
/// state; every lookup does exactly one GET and parses the body it got back.
#[derive(Clone, Debug)]
pub struct ExchangeRateReader {
    base_url: String,
    http: Client,
}

impl ExchangeRateReader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn document_url_for(&self, date: RateDate) -> String {
        document_url(&self.base_url, date.year(), date.month(), date.day())
    }

    /// Rate of `currency_code` against the base currency on the given day.
    pub async fn get_exchange_rate(
        &self,
        currency_code: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<f64, RateError> {
        let date = RateDate::new(year, month, day)?;
        self.exchange_rate_on(currency_code, date).await
    }

    /// Cross rate `rate(from) / rate(to)` on the given day, taken from a
    /// single document.
    pub async fn get_cross_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<f64, RateError> {
        let date = RateDate::new(year, month, day)?;
        self.cross_rate_on(from_currency, to_currency, date).await
    }

    pub async fn exchange_rate_on(&self, currency_code: &str, date: RateDate) -> Result<f64, RateError> {
        let doc = self.fetch_document(date).await?;
        let rate = find_rate(&doc, currency_code)?;
        debug!("{} on {} = {}", currency_code, date, rate);
        Ok(rate)
    }

    pub async fn cross_rate_on(
        &self,
        from_currency: &str,
        to_currency: &str,
        date: RateDate,
    ) -> Result<f64, RateError> {
        let doc = self.fetch_document(date).await?;
        let rate = find_cross_rate(&doc, from_currency, to_currency)?;
        debug!("{}/{} on {} = {}", from_currency, to_currency, date, rate);
        Ok(rate)
    }

    pub async fn fetch_document(&self, date: RateDate) -> Result<FxDocument, RateError> {
        let url = self.document_url_for(date);
        debug!("fetching rate document {}", url);

        // body is fully buffered here; the connection goes back to the pool
        // (or is dropped) on every return path
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!("fetched {} bytes from {}", body.len(), url);

        parse_document(&body)
    }
}

pub fn parse_document(bytes: &[u8]) -> Result<FxDocument, RateError> {
    Ok(FxDocument::from_reader(bytes)?)
}

/// First record in document order whose code matches exactly: case and
/// surrounding whitespace included.
pub fn find_rate(doc: &FxDocument, currency_code: &str) -> Result<f64, RateError> {
    for (i, record) in doc.records.iter().enumerate() {
        if record_code(record, i)? == currency_code {
            return parse_rate(record, i);
        }
    }
    Err(RateError::CurrencyNotFound(currency_code.to_string()))
}

/// One pass over the records, keeping the first match for each code and
/// stopping as soon as both are known.
pub fn find_cross_rate(doc: &FxDocument, from: &str, to: &str) -> Result<f64, RateError> {
    let mut from_rate = None;
    let mut to_rate = None;

    for (i, record) in doc.records.iter().enumerate() {
        if from_rate.is_some() && to_rate.is_some() {
            break;
        }
        let code = record_code(record, i)?;
        if from_rate.is_none() && code == from {
            from_rate = Some(parse_rate(record, i)?);
        }
        if to_rate.is_none() && code == to {
            to_rate = Some(parse_rate(record, i)?);
        }
    }

    let from_rate = from_rate.ok_or_else(|| RateError::CurrencyNotFound(from.to_string()))?;
    let to_rate = to_rate.ok_or_else(|| RateError::CurrencyNotFound(to.to_string()))?;
    if to_rate == 0.0 {
        return Err(RateError::ZeroRate(to.to_string()));
    }
    Ok(from_rate / to_rate)
}

fn record_code(record: &FxRecord, index: usize) -> Result<&str, RateError> {
    record
        .currency_code
        .as_deref()
        .ok_or_else(|| RateError::Record(format!("fx record {} has no currency_code text", index + 1)))
}

fn parse_rate(record: &FxRecord, index: usize) -> Result<f64, RateError> {
    let code = record_code(record, index)?;
    let value = record
        .rate
        .as_deref()
        .ok_or_else(|| RateError::Record(format!("fx record {} ({}) has no rate text", index + 1, code)))?;

    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| RateError::InvalidRate {
            code: code.to_string(),
            value: value.to_string(),
        })
}
