//! Links registry business addresses to a national reference address extract
//! and assigns the reference coordinates.
//!
//! [`linker::link`] is a pure in-memory transform; `data::repo` reads and
//! writes the CSV tables around it.

pub mod config;
pub mod data;
pub mod linker;
pub mod utils;


pub use config::LinkerConfig;
pub use data::error::LinkError;
pub use linker::index::ReferenceIndex;
pub use linker::{link, LinkResult};
