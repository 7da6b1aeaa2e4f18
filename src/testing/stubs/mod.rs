mod scripted_driver;
mod vec_stream;

pub use scripted_driver::ScriptedDriver;
pub use vec_stream::VecStream;
