mod assembler;
mod error;

pub use assembler::{assemble, ArtifactRetention, OutputDocument};
pub use error::MergeError;
