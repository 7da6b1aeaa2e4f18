mod error;
mod streams;

pub use error::BuildError;
pub use streams::build_stream;
