pub mod error;
pub mod checksum;
pub mod config;

pub mod reference;
pub mod line;
pub mod encode;
pub mod layout;
pub mod section;
pub mod artifact;
pub mod render;
pub mod pipeline;

pub use crate::config::BuildConfig;
pub use crate::error::{GgError, Result};
pub use crate::layout::{Channel, MarkerPlacement};
pub use crate::reference::table::ReferenceTable;
pub use crate::render::{ArtifactRenderer, Renderer};
pub use crate::section::partition::SectionRange;
