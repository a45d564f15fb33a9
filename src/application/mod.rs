//! Application layer - the session facade.
//!
//! This layer wires the domain to the ports: it memoizes the gateway's
//! public key, hands out payment products, and drives the encryption of
//! validated requests.

mod session;

pub use session::Session;
