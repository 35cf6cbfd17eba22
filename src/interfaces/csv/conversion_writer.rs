use crate::error::Result;
use crate::interfaces::dto::ConvertBoletoResponse;
use serde::Serialize;
use std::io::Write;

/// Flat CSV row for a conversion; the QR image is left out.
#[derive(Debug, Serialize)]
struct ConversionRecord<'a> {
    kind: &'static str,
    amount: String,
    expiration_date: Option<&'a str>,
    txid: &'a str,
    message: &'a str,
    payload: &'a str,
}

pub struct ConversionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ConversionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_conversion(&mut self, response: &ConvertBoletoResponse) -> Result<()> {
        let mut amount = response.amount;
        amount.rescale(2);

        self.writer.serialize(ConversionRecord {
            kind: response.kind.as_str(),
            amount: amount.to_string(),
            expiration_date: response.expiration_date.as_deref(),
            txid: &response.txid,
            message: &response.message,
            payload: &response.payload,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
