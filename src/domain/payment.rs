use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

pub const MAX_MERCHANT_NAME_LEN: usize = 25;
pub const MAX_MERCHANT_CITY_LEN: usize = 15;
pub const MAX_MESSAGE_LEN: usize = 50;
pub const TRANSACTION_ID_LEN: usize = 25;

const MESSAGE_SEPARATOR: &str = " · ";

/// Caller-supplied values that complement or replace what the boleto carries.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub amount_override: Option<Decimal>,
    pub payer_name: Option<String>,
    pub message: Option<String>,
}

/// Who receives the Pix payment.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantIdentity {
    pub pix_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
}

/// Normalized arguments for the Pix payload encoder.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub pix_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_id: String,
    pub message: String,
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Picks the amount to charge: a positive override wins over the decoded amount.
///
/// Returns `None` when the resulting amount, rounded to cents, is not positive.
pub fn resolve_amount(decoded: Decimal, amount_override: Option<Decimal>) -> Option<Decimal> {
    let amount = match amount_override {
        Some(value) if value > Decimal::ZERO => round_currency(value),
        _ => round_currency(decoded),
    };
    (amount > Decimal::ZERO).then_some(amount)
}

/// Uppercase, accent-free city name that fits the payload field.
pub fn normalize_city(city: &str) -> String {
    let stripped: String = city
        .trim()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    truncate_chars(&stripped.to_uppercase(), MAX_MERCHANT_CITY_LEN)
}

pub fn normalize_merchant_name(name: &str) -> String {
    truncate_chars(name.trim(), MAX_MERCHANT_NAME_LEN)
}

/// Joins the free-text message and the payer annotation.
pub fn compose_message(message: Option<&str>, payer_name: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
        parts.push(message.to_string());
    }
    if let Some(payer) = payer_name.map(str::trim).filter(|p| !p.is_empty()) {
        parts.push(format!("Pagador: {payer}"));
    }
    truncate_chars(&parts.join(MESSAGE_SEPARATOR), MAX_MESSAGE_LEN)
}

/// Derives the Pix txid from the boleto identifier and a millisecond timestamp.
///
/// SHA-256 of `"{identifier}-{timestamp_millis}"`, first 25 hex digits, uppercased.
pub fn derive_transaction_id(identifier: &str, timestamp_millis: i64) -> String {
    let digest = Sha256::digest(format!("{identifier}-{timestamp_millis}").as_bytes());
    let mut txid = hex::encode_upper(digest);
    txid.truncate(TRANSACTION_ID_LEN);
    txid
}
