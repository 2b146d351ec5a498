pub mod container;
pub mod pipeline;

pub use container::{read_container, write_container};
pub use pipeline::{CodecPipeline, CompressReport, DebugOutputs};
