pub mod minimize;
pub mod tokenize;

pub use minimize::{minimize, strip_comment, COMMENT_MARKER};
pub use tokenize::{tokenize, ParamToken, SourceLine};
