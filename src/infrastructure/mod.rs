//! Adapters for the domain ports: the BR Code encoder and clocks.

pub mod brcode;
pub mod clock;
