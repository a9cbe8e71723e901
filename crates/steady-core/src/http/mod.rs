//! HTTP layer: client, transport seam and response repair

pub mod cancel;
pub mod client;
pub mod sanitize;
pub mod transport;

pub use cancel::cancel_after;
pub use client::Client;
pub use sanitize::sanitize_json;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
