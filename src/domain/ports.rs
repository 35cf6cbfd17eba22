use super::payment::PaymentRequest;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pix "copia e cola" payload and its rendered QR code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCode {
    pub payload: String,
    /// `data:image/png;base64,...` URL.
    pub image_base64: String,
}

#[async_trait]
pub trait PixEncoder: Send + Sync {
    async fn encode(&self, request: &PaymentRequest) -> Result<PixCode>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type PixEncoderBox = Box<dyn PixEncoder>;
pub type ClockBox = Box<dyn Clock>;
