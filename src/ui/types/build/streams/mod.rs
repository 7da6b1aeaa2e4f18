use crate::streams::Stream;
use crate::streams::csv_stream::CsvStream;
use crate::streams::generators::ShapesGenerator;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::StreamChoice;

mod csv_file;
mod shapes_generator;

pub fn build_stream(choice: StreamChoice) -> Result<Box<dyn Stream>, BuildError> {
    match choice {
        StreamChoice::CsvFile(p) => {
            let s = CsvStream::try_from(p)?;
            Ok(Box::new(s))
        }
        StreamChoice::ShapesGenerator(p) => {
            let s = ShapesGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
    }
}
