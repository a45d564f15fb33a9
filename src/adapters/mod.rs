//! Adapters - Implementations of the port interfaces.
//!
//! - `gateway` - HTTP client against the real gateway API
//! - `mock` - In-memory implementations for tests and examples

pub mod gateway;
pub mod mock;

pub use gateway::GatewayClient;
pub use mock::MockGateway;
