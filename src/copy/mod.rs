mod copy_engine;
mod output_sink;

pub use copy_engine::CopyEngine;
pub use output_sink::OutputSink;
