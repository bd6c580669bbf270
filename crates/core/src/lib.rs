//! Domain logic shared by the persistence, pipeline, and HTTP layers.
//!
//! Nothing in this crate performs I/O. The collaborator contracts in
//! [`generation`] are implemented by `vidscribe-pipeline`.

pub mod article_status;
pub mod error;
pub mod generation;
pub mod transcript;
pub mod types;
pub mod wordpress;
pub mod youtube;
