//! Cross-cutting helpers shared by the workspace crates.

pub mod types;
pub mod utils;
