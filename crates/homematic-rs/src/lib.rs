// --- Foundation Modules ---
pub mod error;
pub mod math;
pub mod variable;

// --- Wire Codecs ---
pub mod rpc;

// --- Top-level Exports ---
pub use error::RpcError;
pub use rpc::{BinaryDecoder, BinaryEncoder};
pub use variable::{Variable, VariableType};
