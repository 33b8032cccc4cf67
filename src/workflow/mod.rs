mod polyglot_workflow;

pub use polyglot_workflow::PolyglotWorkflow;
