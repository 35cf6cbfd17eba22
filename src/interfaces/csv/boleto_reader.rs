use crate::domain::payment::MerchantIdentity;
use crate::error::{PixError, Result};
use crate::interfaces::dto::ConvertBoletoRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a batch file. Identity comes from the command line, not the file.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct BoletoRecord {
    pub linha_digitavel: Option<String>,
    pub codigo_barras: Option<String>,
    pub amount_override: Option<Decimal>,
    pub payer_name: Option<String>,
    pub message: Option<String>,
}

impl BoletoRecord {
    pub fn into_request(self, identity: &MerchantIdentity) -> ConvertBoletoRequest {
        ConvertBoletoRequest {
            linha_digitavel: self.linha_digitavel,
            codigo_barras: self.codigo_barras,
            amount_override: self.amount_override,
            pix_key: identity.pix_key.clone(),
            merchant_name: identity.merchant_name.clone(),
            merchant_city: identity.merchant_city.clone(),
            payer_name: self.payer_name,
            message: self.message,
        }
    }
}

/// Reads boleto rows from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths, so
/// trailing optional columns may be left out.
pub struct BoletoReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BoletoReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows, one `Result` per record.
    pub fn records(self) -> impl Iterator<Item = Result<BoletoRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PixError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "linha_digitavel,codigo_barras,amount_override,payer_name,message";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             00190500954014481606906809350314337370000000100,,,Maria,Aluguel\n\
             ,00193373700000000000500954014481606906809350,25.90,,"
        );
        let records: Vec<Result<BoletoRecord>> = BoletoReader::new(data.as_bytes()).records().collect();

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert!(first.linha_digitavel.is_some());
        assert_eq!(first.codigo_barras, None);
        assert_eq!(first.payer_name.as_deref(), Some("Maria"));

        let second = records[1].as_ref().unwrap();
        assert_eq!(second.linha_digitavel, None);
        assert_eq!(second.amount_override, Some(dec!(25.90)));
        assert_eq!(second.message, None);
    }

    #[test]
    fn test_reader_short_rows() {
        let data = format!("{HEADER}\n,00193373700000001000500954014481606906809350");
        let records: Vec<Result<BoletoRecord>> = BoletoReader::new(data.as_bytes()).records().collect();

        let record = records[0].as_ref().unwrap();
        assert!(record.codigo_barras.is_some());
        assert_eq!(record.amount_override, None);
    }

    #[test]
    fn test_reader_malformed_amount() {
        let data = format!("{HEADER}\n,00193373700000001000500954014481606906809350,abc,,");
        let records: Vec<Result<BoletoRecord>> = BoletoReader::new(data.as_bytes()).records().collect();

        assert!(matches!(records[0], Err(PixError::Csv(_))));
    }

    #[test]
    fn test_into_request_copies_identity() {
        let identity = MerchantIdentity {
            pix_key: "loja@example.com".to_string(),
            merchant_name: "Loja".to_string(),
            merchant_city: "NATAL".to_string(),
        };
        let request = BoletoRecord {
            payer_name: Some("Joao".to_string()),
            ..Default::default()
        }
        .into_request(&identity);

        assert_eq!(request.pix_key, "loja@example.com");
        assert_eq!(request.merchant_city, "NATAL");
        assert_eq!(request.payer_name.as_deref(), Some("Joao"));
    }
}
