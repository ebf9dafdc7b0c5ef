// Public contracts for the Plantmarket API
// This crate defines the response envelope and the DTOs shared between the
// server and its clients.

pub mod cart;
pub mod common;
pub mod order;
pub mod plant;
pub mod user;

pub use cart::*;
pub use common::*;
pub use order::*;
pub use plant::*;
pub use user::*;
