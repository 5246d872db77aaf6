//! Data models for the client
//!
//! Each sub-module covers one part of a submission: what the user staged,
//! what the sampler produced, what the backend answered and where the
//! attempt stands.

mod frame;
mod media;
mod movie;
mod submission;

pub use frame::*;
pub use media::*;
pub use movie::*;
pub use submission::*;
