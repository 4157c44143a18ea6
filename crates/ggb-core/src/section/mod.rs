// crates/ggb-core/src/section/mod.rs
//
// Sections: fixed-size line chunks, the unit of parallel work and of
// output artifacts.

pub mod builder;
pub mod partition;
pub mod report;
pub mod sampler;
pub mod scheduler;

pub use builder::{encode_section, SectionBuilder, SectionEncoding};
pub use partition::{partition, section_count, SectionRange};
pub use report::{BuildStatus, FixtureStatus, SectionFailure, SectionReport};
pub use sampler::sample_sections;
pub use scheduler::{run_sections, SectionOutcome};
