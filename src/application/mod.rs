//! Application layer containing the conversion orchestration.
//!
//! `BoletoConverter` is the primary entry point: it decodes a boleto, builds
//! the `PaymentRequest` through the `PaymentRequestAssembler` and awaits the
//! Pix encoder port.

pub mod assembler;
pub mod converter;
