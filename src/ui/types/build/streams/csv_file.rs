use crate::streams::csv_stream::CsvStream;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::CsvFileParameters;

impl TryFrom<CsvFileParameters> for CsvStream {
    type Error = BuildError;

    fn try_from(p: CsvFileParameters) -> Result<Self, Self::Error> {
        Ok(CsvStream::open(p.path)?)
    }
}
