//! Outbound HTTP.

pub mod client;

pub use client::HttpImageSource;
