//! Free text in, structured JSON out.
//!
//! Each endpoint is described by a [`blueprint::Blueprint`]; the HTTP layer
//! only decides between calling the model and using the blueprint's mock.

pub mod blueprint;
pub mod errors;
pub mod mock;
pub mod models;
pub mod prompt;

pub use blueprint::{Blueprint, MISSION_PLAN, NEBULA_STRUCTURER};
pub use errors::StructurerError;
