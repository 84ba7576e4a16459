//! Adapters (hexagonal architecture).
//!
//! - [`inbound`]: the command-line interface driving the application.
//! - [`outbound`]: storage backends implementing the ports.

pub mod inbound;
pub mod outbound;
