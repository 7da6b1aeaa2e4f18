use crate::core::Observation;
use crate::streams::stream::Stream;
use crate::utils::file_parsing::{split_delimited, unquote};
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Finite stream of observations read from a delimited text file.
///
/// The first non-empty line names the features; every following non-empty
/// line is one observation. A cell that is empty after unquoting means the
/// feature is absent from that observation. Rows whose cell count does not
/// match the header are skipped and counted, not treated as fatal.
#[derive(Debug)]
pub struct CsvStream {
    path: PathBuf,
    feature_names: Vec<String>,
    rows: Vec<Observation>,
    skipped_rows: usize,
    cursor: usize,
}

impl CsvStream {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::open_with_delimiter(path, ',')
    }

    pub fn open_with_delimiter<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());

        let Some(header) = lines.next() else {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{}: no header line", path.display()),
            ));
        };
        let feature_names: Vec<String> = split_delimited(header, delimiter)
            .iter()
            .map(|cell| unquote(cell).to_string())
            .collect();
        if feature_names.iter().any(String::is_empty) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{}: empty feature name in header", path.display()),
            ));
        }
        for (i, name) in feature_names.iter().enumerate() {
            if feature_names[..i].contains(name) {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("{}: duplicate feature name '{name}'", path.display()),
                ));
            }
        }

        let mut rows = Vec::new();
        let mut skipped_rows = 0;
        for line in lines {
            let cells = split_delimited(line, delimiter);
            if cells.len() != feature_names.len() {
                skipped_rows += 1;
                continue;
            }
            let observation: Observation = feature_names
                .iter()
                .zip(&cells)
                .filter_map(|(feature, cell)| {
                    let attribute = unquote(cell);
                    (!attribute.is_empty()).then(|| (feature.clone(), attribute.to_string()))
                })
                .collect();
            rows.push(observation);
        }

        Ok(Self {
            path,
            feature_names,
            rows,
            skipped_rows,
            cursor: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows dropped at open time because their cell count did not match the
    /// header.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Stream for CsvStream {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn has_more_observations(&self) -> bool {
        self.cursor < self.rows.len()
    }

    fn next_observation(&mut self) -> Option<Observation> {
        let row = self.rows.get(self.cursor)?;
        self.cursor += 1;
        Some(row.clone())
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.cursor = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn reads_header_and_rows() {
        let file = csv_file("color,shape\nred,circle\nblue,square\n");
        let mut stream = CsvStream::open(file.path()).unwrap();
        assert_eq!(stream.feature_names(), ["color", "shape"]);
        assert_eq!(stream.len(), 2);

        let first = stream.next_observation().unwrap();
        assert_eq!(first.get("color"), Some("red"));
        assert_eq!(first.get("shape"), Some("circle"));

        let second = stream.next_observation().unwrap();
        assert_eq!(second.get("shape"), Some("square"));

        assert!(!stream.has_more_observations());
        assert_eq!(stream.next_observation(), None);
    }

    #[test]
    fn quoted_cells_and_quoted_header() {
        let file = csv_file("'sky state',temp\n'sunny, clear',hot\n");
        let mut stream = CsvStream::open(file.path()).unwrap();
        assert_eq!(stream.feature_names(), ["sky state", "temp"]);
        let row = stream.next_observation().unwrap();
        assert_eq!(row.get("sky state"), Some("sunny, clear"));
    }

    #[test]
    fn empty_cells_mean_absent_features() {
        let file = csv_file("color,shape,size\nred,,small\n");
        let mut stream = CsvStream::open(file.path()).unwrap();
        let row = stream.next_observation().unwrap();
        assert_eq!(row.len(), 2);
        assert!(!row.contains_feature("shape"));
    }

    #[test]
    fn ragged_rows_are_skipped_and_counted() {
        let file = csv_file("color,shape\nred,circle\nred\nblue,square,extra\n");
        let stream = CsvStream::open(file.path()).unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.skipped_rows(), 2);
    }

    #[test]
    fn restart_rewinds_to_first_row() {
        let file = csv_file("color\nred\nblue\n");
        let mut stream = CsvStream::open(file.path()).unwrap();
        while stream.next_observation().is_some() {}
        stream.restart().unwrap();
        assert!(stream.has_more_observations());
        assert_eq!(stream.next_observation().unwrap().get("color"), Some("red"));
    }

    #[test]
    fn feeds_a_classifier_end_to_end() {
        use crate::classifiers::NaiveBayes;

        let file = csv_file(crate::testing::dummies::shapes_csv());
        let mut stream = CsvStream::open(file.path()).unwrap();
        let mut model = NaiveBayes::new();
        while let Some(observation) = stream.next_observation() {
            model.train(&observation);
        }

        let conditioning = [("shape", "circle")].into_iter().collect();
        let votes = model.classify("color", Some(&conditioning));
        assert!((votes["red"] - 0.5).abs() < 1e-9);
        assert!((votes["blue"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn header_is_required() {
        let file = csv_file("\n\n");
        let err = CsvStream::open(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn duplicate_feature_names_are_rejected() {
        let file = csv_file("color,color\nred,blue\n");
        let err = CsvStream::open(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
