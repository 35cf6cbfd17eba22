//! Driving adapters: the HTTP endpoint, CSV batch files and the request DTOs
//! they share.

pub mod csv;
pub mod dto;
pub mod http;
