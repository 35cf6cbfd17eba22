//! Domain layer: boleto decoding, payment normalization rules and the ports
//! the application layer depends on.

pub mod boleto;
pub mod payment;
pub mod ports;
