pub mod csv_stream;
pub mod generators;
pub mod stream;

pub use csv_stream::CsvStream;
pub use stream::Stream;
