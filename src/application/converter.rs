use super::assembler::PaymentRequestAssembler;
use crate::domain::boleto::{self, BoletoInput, ParsedBoleto};
use crate::domain::payment::{MerchantIdentity, Overrides, PaymentRequest};
use crate::domain::ports::{ClockBox, PixCode, PixEncoderBox};
use crate::error::Result;

/// Everything produced by one boleto conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub parsed: ParsedBoleto,
    pub request: PaymentRequest,
    pub code: PixCode,
}

/// The entry point for turning a boleto into a Pix charge.
///
/// `BoletoConverter` decodes the boleto, assembles the payment request and
/// hands it to the configured encoder. Decoding and assembly failures are
/// reported before the encoder is ever called.
pub struct BoletoConverter {
    assembler: PaymentRequestAssembler,
    encoder: PixEncoderBox,
}

impl BoletoConverter {
    /// Creates a new `BoletoConverter`.
    ///
    /// # Arguments
    ///
    /// * `encoder` - Renders the Pix payload and QR image.
    /// * `clock` - Time source for transaction id derivation.
    pub fn new(encoder: PixEncoderBox, clock: ClockBox) -> Self {
        Self {
            assembler: PaymentRequestAssembler::new(clock),
            encoder,
        }
    }

    pub async fn convert(
        &self,
        input: &BoletoInput,
        overrides: &Overrides,
        identity: &MerchantIdentity,
    ) -> Result<Conversion> {
        let parsed = boleto::decode(input)?;
        let request = self
            .assembler
            .assemble(input, &parsed, overrides, identity)?;
        let code = self.encoder.encode(&request).await?;

        tracing::info!(
            kind = parsed.kind.as_str(),
            amount = %request.amount,
            txid = %request.transaction_id,
            "boleto converted to pix"
        );

        Ok(Conversion {
            parsed,
            request,
            code,
        })
    }
}
