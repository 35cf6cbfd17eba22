use crate::error::{PixError, Result};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

const LINHA_DIGITAVEL_LEN: usize = 47;
const CODIGO_BARRAS_LEN: usize = 44;

/// Which of the two supported boleto representations was decoded.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum BoletoKind {
    #[serde(rename = "LINHA_DIGITAVEL_47")]
    LinhaDigitavel47,
    #[serde(rename = "CODIGO_BARRAS_44")]
    CodigoBarras44,
}

impl BoletoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoletoKind::LinhaDigitavel47 => "LINHA_DIGITAVEL_47",
            BoletoKind::CodigoBarras44 => "CODIGO_BARRAS_44",
        }
    }

    /// Byte ranges of the due-date factor and of the amount field.
    fn layout(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        match self {
            // [field 1..3 + general DV (33)][factor (4)][amount (10)]
            BoletoKind::LinhaDigitavel47 => (33..37, 37..47),
            // [bank (3)][currency (1)][DV (1)][factor (4)][amount (10)][free field (25)]
            BoletoKind::CodigoBarras44 => (5..9, 9..19),
        }
    }
}

/// Raw boleto identifiers as supplied by the caller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoletoInput {
    pub linha_digitavel: Option<String>,
    pub codigo_barras: Option<String>,
}

impl BoletoInput {
    pub fn linha_digitavel(value: impl Into<String>) -> Self {
        Self {
            linha_digitavel: Some(value.into()),
            codigo_barras: None,
        }
    }

    pub fn codigo_barras(value: impl Into<String>) -> Self {
        Self {
            linha_digitavel: None,
            codigo_barras: Some(value.into()),
        }
    }

    /// The raw string that identifies this boleto, preferring the linha digitavel.
    pub fn identifier(&self) -> Option<&str> {
        self.linha_digitavel
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.codigo_barras.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Payment data extracted from a boleto.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBoleto {
    /// Amount in reais.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub expiration_date: Option<NaiveDate>,
    pub kind: BoletoKind,
}

pub fn only_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_linha_digitavel(digits: &str) -> bool {
    digits.len() == LINHA_DIGITAVEL_LEN && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_codigo_barras(digits: &str) -> bool {
    digits.len() == CODIGO_BARRAS_LEN && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a "fator de vencimento" into a due date.
///
/// The factor counts days since 1997-10-07. A factor of zero means the boleto
/// has no due date.
pub fn expiration_from_factor(factor: &str) -> Option<NaiveDate> {
    let days = factor.parse::<u64>().ok().filter(|days| *days > 0)?;
    NaiveDate::from_ymd_opt(1997, 10, 7)?.checked_add_days(Days::new(days))
}

/// Decodes a linha digitavel (47 digits) or a codigo de barras (44 digits).
///
/// Non-digit separators are stripped first. When both are supplied and the
/// linha digitavel is well formed, it wins. No check digit is verified.
pub fn decode(raw: &BoletoInput) -> Result<ParsedBoleto> {
    let linha = raw.linha_digitavel.as_deref().map(only_digits);
    let barras = raw.codigo_barras.as_deref().map(only_digits);

    let (kind, digits) = if let Some(digits) = linha.filter(|d| is_linha_digitavel(d)) {
        (BoletoKind::LinhaDigitavel47, digits)
    } else if let Some(digits) = barras.filter(|d| is_codigo_barras(d)) {
        (BoletoKind::CodigoBarras44, digits)
    } else {
        return Err(PixError::UnsupportedFormat);
    };

    let (factor_range, amount_range) = kind.layout();
    let centavos: i64 = digits[amount_range]
        .parse()
        .map_err(|_| PixError::UnsupportedFormat)?;
    let expiration_date = expiration_from_factor(&digits[factor_range]);

    tracing::debug!(
        kind = kind.as_str(),
        centavos,
        ?expiration_date,
        "boleto decoded"
    );

    Ok(ParsedBoleto {
        amount: Decimal::new(centavos, 2),
        expiration_date,
        kind,
    })
}
