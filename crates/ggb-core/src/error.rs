// crates/ggb-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GgError>;

#[derive(Debug, Error)]
pub enum GgError {
    #[error("reference error: {0}")]
    Reference(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),


    #[error("unknown parameter {letter} for command {command}")]
    UnknownParameter { command: String, letter: char },

    #[error("malformed parameter token: {0:?}")]
    MalformedToken(String),

    #[error("oversample: requested {requested} fixture sections, only {available} available")]
    Oversample { requested: usize, available: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("artifact format error: {0}")]
    ArtifactFormat(String),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("section {index}: {source}")]
    Section {
        index: usize,
        #[source]
        source: Box<GgError>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GgError {
    /// Wrap an error with the index of the section it happened in.
    pub fn in_section(self, index: usize) -> Self {
        match self {
            GgError::Section { .. } => self,
            other => GgError::Section {
                index,
                source: Box::new(other),
            },
        }
    }

    /// True for the per-line / per-field conditions that drop encoding
    /// work without failing the section.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GgError::UnknownCommand(_)
                | GgError::UnknownParameter { .. }
                | GgError::MalformedToken(_)
        )
    }
}
