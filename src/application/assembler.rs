use crate::domain::boleto::{BoletoInput, ParsedBoleto};
use crate::domain::payment::{
    MerchantIdentity, Overrides, PaymentRequest, compose_message, derive_transaction_id,
    normalize_city, normalize_merchant_name, resolve_amount,
};
use crate::domain::ports::ClockBox;
use crate::error::{PixError, Result};

/// Builds the normalized `PaymentRequest` handed to the Pix encoder.
///
/// The assembler is stateless apart from its clock, which provides the
/// timestamp mixed into every transaction id.
pub struct PaymentRequestAssembler {
    clock: ClockBox,
}

impl PaymentRequestAssembler {
    pub fn new(clock: ClockBox) -> Self {
        Self { clock }
    }

    /// Merges the decoded boleto with caller overrides and merchant identity.
    ///
    /// # Errors
    ///
    /// * `MissingIdentity` - a required identity field is empty after normalization.
    /// * `InvalidAmount` - the resolved amount is zero or negative.
    pub fn assemble(
        &self,
        input: &BoletoInput,
        parsed: &ParsedBoleto,
        overrides: &Overrides,
        identity: &MerchantIdentity,
    ) -> Result<PaymentRequest> {
        let pix_key = identity.pix_key.trim().to_string();
        let merchant_name = normalize_merchant_name(&identity.merchant_name);
        let merchant_city = normalize_city(&identity.merchant_city);

        if pix_key.is_empty() {
            return Err(PixError::MissingIdentity("pixKey"));
        }
        if merchant_name.is_empty() {
            return Err(PixError::MissingIdentity("merchantName"));
        }
        if merchant_city.is_empty() {
            return Err(PixError::MissingIdentity("merchantCity"));
        }

        let amount = resolve_amount(parsed.amount, overrides.amount_override)
            .ok_or(PixError::InvalidAmount)?;

        let identifier = input.identifier().unwrap_or_default();
        let transaction_id =
            derive_transaction_id(identifier, self.clock.now().timestamp_millis());

        let message = compose_message(
            overrides.message.as_deref(),
            overrides.payer_name.as_deref(),
        );

        Ok(PaymentRequest {
            pix_key,
            merchant_name,
            merchant_city,
            amount,
            transaction_id,
            message,
        })
    }
}
