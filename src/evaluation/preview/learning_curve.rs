use crate::evaluation::ProgressSnapshot;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub enum CurveFormat {
    Csv,
    Tsv,
    Json,
}

/// Accumulated progress snapshots of one evaluation run.
#[derive(Debug, Default)]
pub struct LearningCurve {
    entries: Vec<ProgressSnapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: ProgressSnapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<ProgressSnapshot> {
        self.entries.last().copied()
    }

    pub fn entries(&self) -> &[ProgressSnapshot] {
        &self.entries
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: CurveFormat) -> Result<(), Error> {
        match fmt {
            CurveFormat::Csv => self.export_with_delimiter(path, ','),
            CurveFormat::Tsv => self.export_with_delimiter(path, '\t'),
            CurveFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "observations_seen{d}accuracy{d}kappa{d}seconds", d = delimiter)?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}{d}{:.6}",
                s.observations_seen,
                s.accuracy,
                s.kappa,
                s.seconds,
                d = delimiter
            )?;
        }
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "[")?;
        for (i, s) in self.entries.iter().enumerate() {
            writeln!(
                w,
                "  {{\"observations_seen\":{},\"accuracy\":{},\"kappa\":{},\"seconds\":{}}}{}",
                s.observations_seen,
                s.accuracy,
                s.kappa,
                s.seconds,
                if i + 1 == self.entries.len() { "" } else { "," }
            )?;
        }
        writeln!(w, "]")?;
        Ok(())
    }
}
