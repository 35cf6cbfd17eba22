use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{PixCode, PixEncoder};
use crate::error::{PixError, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

const PIX_GUI: &str = "br.gov.bcb.pix";
const CURRENCY_BRL: &str = "986";
const COUNTRY_BR: &str = "BR";
const MAX_FIELD_LEN: usize = 99;
/// Length of the GUI subfield that opens template 26.
const GUI_FIELD_LEN: usize = 4 + PIX_GUI.len();

/// Encodes static Pix charges as EMV "BR Code" payloads and PNG QR codes.
#[derive(Debug, Clone, Copy)]
pub struct BrCodeEncoder {
    /// Minimum side of the rendered QR image, in pixels.
    pub min_dimension: u32,
}

impl Default for BrCodeEncoder {
    fn default() -> Self {
        Self { min_dimension: 256 }
    }
}

impl BrCodeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the "copia e cola" payload, CRC included.
    pub fn payload(&self, request: &PaymentRequest) -> Result<String> {
        let mut amount = request.amount;
        amount.rescale(2);

        let mut payload = String::new();
        payload.push_str(&field("00", "01")?);
        payload.push_str(&field("26", &merchant_account_info(request)?)?);
        payload.push_str(&field("52", "0000")?);
        payload.push_str(&field("53", CURRENCY_BRL)?);
        payload.push_str(&field("54", &amount.to_string())?);
        payload.push_str(&field("58", COUNTRY_BR)?);
        payload.push_str(&field("59", &request.merchant_name)?);
        payload.push_str(&field("60", &request.merchant_city)?);
        payload.push_str(&field("62", &field("05", &request.transaction_id)?)?);
        payload.push_str("6304");

        let crc = crc16_ccitt(payload.as_bytes());
        payload.push_str(&format!("{crc:04X}"));
        Ok(payload)
    }

    fn render(&self, payload: &str) -> Result<String> {
        let code =
            QrCode::new(payload.as_bytes()).map_err(|e| PixError::Encoding(e.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .build();

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| PixError::Encoding(e.to_string()))?;

        Ok(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(png.into_inner())
        ))
    }
}

#[async_trait]
impl PixEncoder for BrCodeEncoder {
    async fn encode(&self, request: &PaymentRequest) -> Result<PixCode> {
        let payload = self.payload(request)?;

        let encoder = *self;
        let for_render = payload.clone();
        let image_base64 = tokio::task::spawn_blocking(move || encoder.render(&for_render))
            .await
            .map_err(|e| PixError::Encoding(e.to_string()))??;

        Ok(PixCode {
            payload,
            image_base64,
        })
    }
}

/// ID + two-digit length + value.
fn field(id: &str, value: &str) -> Result<String> {
    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(PixError::Encoding(format!(
            "field {id} is {len} characters long, the limit is {MAX_FIELD_LEN}"
        )));
    }
    Ok(format!("{id}{len:02}{value}"))
}

/// Template 26: GUI, key and, when there is room left, the message.
fn merchant_account_info(request: &PaymentRequest) -> Result<String> {
    let mut info = field("00", PIX_GUI)?;
    info.push_str(&field("01", &request.pix_key)?);

    let used = GUI_FIELD_LEN + 4 + request.pix_key.chars().count();
    let room = MAX_FIELD_LEN.saturating_sub(used + 4);
    if !request.message.is_empty() && room > 0 {
        let message: String = request.message.chars().take(room).collect();
        info.push_str(&field("02", &message)?);
    }
    Ok(info)
}

/// CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF).
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
