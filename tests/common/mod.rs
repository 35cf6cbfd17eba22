#![allow(dead_code)]

use std::io::{Error, Write};

/// Fields 1 to 3 plus the general check digit of a real Banco do Brasil slip.
pub const LINHA_PREFIX: &str = "001905009540144816069068093503143";
/// Bank, currency and check digit.
pub const BARRAS_PREFIX: &str = "00193";
pub const FREE_FIELD: &str = "0500954014481606906809350";

pub fn linha(factor: u32, centavos: u64) -> String {
    format!("{LINHA_PREFIX}{factor:04}{centavos:010}")
}

pub fn barras(factor: u32, centavos: u64) -> String {
    format!("{BARRAS_PREFIX}{factor:04}{centavos:010}{FREE_FIELD}")
}

/// Writes a batch CSV with the standard header followed by `rows`.
pub fn batch_csv(rows: &[[&str; 5]]) -> Result<tempfile::NamedTempFile, Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    {
        let mut wtr = csv::Writer::from_writer(file.as_file_mut());
        wtr.write_record([
            "linha_digitavel",
            "codigo_barras",
            "amount_override",
            "payer_name",
            "message",
        ])?;
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    file.flush()?;
    Ok(file)
}
