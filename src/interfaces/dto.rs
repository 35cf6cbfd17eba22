use crate::application::converter::{BoletoConverter, Conversion};
use crate::domain::boleto::{
    BoletoInput, BoletoKind, ParsedBoleto, is_codigo_barras, is_linha_digitavel,
};
use crate::domain::payment::{MerchantIdentity, Overrides};
use crate::error::{PixError, Result};
use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of a conversion request.
///
/// Field lengths are checked by the derived validator; the rules spanning
/// several fields are checked in [`ConvertBoletoRequest::check`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConvertBoletoRequest {
    pub linha_digitavel: Option<String>,
    pub codigo_barras: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount_override: Option<Decimal>,
    #[serde(default)]
    #[validate(length(min = 3, max = 77, message = "pixKey must have between 3 and 77 characters"))]
    pub pix_key: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 25,
        message = "merchantName must have between 1 and 25 characters"
    ))]
    pub merchant_name: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 15,
        message = "merchantCity must have between 1 and 15 characters (without accents)"
    ))]
    pub merchant_city: String,
    #[validate(length(min = 1, max = 50, message = "payerName must have between 1 and 50 characters"))]
    pub payer_name: Option<String>,
    pub message: Option<String>,
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

impl ConvertBoletoRequest {
    /// Runs every validation rule and collects all violations.
    pub fn check(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let linha = self.linha_digitavel.as_deref().filter(|s| !s.is_empty());
        let barras = self.codigo_barras.as_deref().filter(|s| !s.is_empty());
        match (linha, barras) {
            (Some(linha), None) => {
                if !is_linha_digitavel(linha) {
                    errors.add(
                        "linha_digitavel",
                        violation("digits_47", "linhaDigitavel must contain exactly 47 digits"),
                    );
                }
            }
            (None, barras) => {
                if !barras.is_some_and(is_codigo_barras) {
                    errors.add(
                        "codigo_barras",
                        violation("digits_44", "codigoBarras must contain exactly 44 digits"),
                    );
                }
            }
            (Some(_), Some(_)) => {
                errors.add(
                    "codigo_barras",
                    violation(
                        "exclusive",
                        "provide either linhaDigitavel or codigoBarras, not both",
                    ),
                );
            }
        }

        if self.amount_override.is_some_and(|amount| amount < dec!(0.01)) {
            errors.add(
                "amount_override",
                violation("min", "amountOverride must be greater than 0"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the request and splits it into the domain inputs.
    ///
    /// `default_message` fills in for a missing or blank `message`.
    pub fn into_parts(
        self,
        default_message: Option<&str>,
    ) -> Result<(BoletoInput, Overrides, MerchantIdentity)> {
        self.check().map_err(violations)?;

        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| default_message.map(str::to_string));

        Ok((
            BoletoInput {
                linha_digitavel: self.linha_digitavel.filter(|s| !s.is_empty()),
                codigo_barras: self.codigo_barras.filter(|s| !s.is_empty()),
            },
            Overrides {
                amount_override: self.amount_override,
                payer_name: self.payer_name,
                message,
            },
            MerchantIdentity {
                pix_key: self.pix_key,
                merchant_name: self.merchant_name,
                merchant_city: self.merchant_city,
            },
        ))
    }
}

/// Flattens validator output into sorted, human-readable messages.
pub fn violations(errors: ValidationErrors) -> PixError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid ({})", err.code),
            })
        })
        .collect();
    messages.sort();
    PixError::Validation(messages)
}

/// ISO-8601 timestamp at UTC midnight, e.g. `2000-07-03T00:00:00.000Z`.
pub fn iso_midnight(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantView {
    pub name: String,
    pub city: String,
    pub pix_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertBoletoResponse {
    pub kind: BoletoKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub expiration_date: Option<String>,
    pub txid: String,
    pub message: String,
    pub merchant: MerchantView,
    pub payload: String,
    pub image_base64: String,
}

impl From<Conversion> for ConvertBoletoResponse {
    fn from(conversion: Conversion) -> Self {
        let Conversion {
            parsed,
            request,
            code,
        } = conversion;
        Self {
            kind: parsed.kind,
            amount: request.amount,
            expiration_date: parsed.expiration_date.map(iso_midnight),
            txid: request.transaction_id,
            message: request.message,
            merchant: MerchantView {
                name: request.merchant_name,
                city: request.merchant_city,
                pix_key: request.pix_key,
            },
            payload: code.payload,
            image_base64: code.image_base64,
        }
    }
}

/// What `decode` reports about a boleto, without building a charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBoleto {
    pub kind: BoletoKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub expiration_date: Option<String>,
}

impl From<ParsedBoleto> for DecodedBoleto {
    fn from(parsed: ParsedBoleto) -> Self {
        Self {
            kind: parsed.kind,
            amount: parsed.amount,
            expiration_date: parsed.expiration_date.map(iso_midnight),
        }
    }
}

/// Validates and converts one request. Shared by the HTTP, CLI and CSV interfaces.
pub async fn run_conversion(
    converter: &BoletoConverter,
    request: ConvertBoletoRequest,
    default_message: Option<&str>,
) -> Result<ConvertBoletoResponse> {
    let (input, overrides, identity) = request.into_parts(default_message)?;
    let conversion = converter.convert(&input, &overrides, &identity).await?;
    Ok(conversion.into())
}
