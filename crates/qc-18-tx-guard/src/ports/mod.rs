//! Ports layer - Hexagonal architecture interfaces.
//!
//! - `inbound`: API exposed to Consensus and the Mempool
//! - `outbound`: Block and transaction projections consumed by the guard

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
