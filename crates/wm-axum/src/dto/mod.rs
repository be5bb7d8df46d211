//! Data Transfer Objects (DTOs) for the relay HTTP contract.

pub mod transfer;

pub use transfer::{ReceiveRequest, ReceiveResponse, SendRequest, SendResponse};
