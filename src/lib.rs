//! Recipe AI server - turns a photo of ingredients into an HTML recipe
//!
//! Uploaded images are sent to a vision model that lists the visible food
//! items, and an ingredient list is sent to a text model that writes a recipe.

pub mod ai;
pub mod error;
pub mod ingredients;
pub mod models;
pub mod prompts;
pub mod recipe;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
