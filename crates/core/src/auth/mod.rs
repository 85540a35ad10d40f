//! Session handshake (connect, then login)

pub mod errors;
pub mod ports;
pub mod service;

pub use errors::HandshakeError;
pub use ports::AuthResultSink;
pub use service::AuthProtocol;
