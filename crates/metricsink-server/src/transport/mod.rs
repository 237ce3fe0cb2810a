//! HTTP transport: path decoding and error rendering.

pub mod http;
