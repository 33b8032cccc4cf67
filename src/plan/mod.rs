mod polyglot_plan;

pub use polyglot_plan::{Invocation, PolyglotPlan, IMAGE_EXTENSIONS};
