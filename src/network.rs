//! Representation and handling of logic networks

pub mod area;
mod gates;
mod network;
mod signal;
pub mod stats;
pub mod variants;

pub use gates::{BinaryType, Gate, LutGate, NaryType, TernaryType};
pub use network::Network;
pub use signal::Signal;
