mod phase;
mod polyglot_error;
mod progress_model;
mod sizes;

pub type R<A> = Result<A, PolyglotError>;

pub use phase::Phase;
pub use polyglot_error::PolyglotError;
pub use progress_model::ProgressModel;
pub use sizes::*;
