use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::schema::SurveyExport;

/// Report destination: a file when a path is given, stdout otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>, PathBuf),
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => {
                let file = File::create(&path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Output::File(BufWriter::new(file), path)
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        let target = output.display_path();
        serde_json::to_writer_pretty(&mut output, value)
            .map_err(anyhow::Error::from)
            .and_then(|()| writeln!(&mut output).map_err(Into::into))
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush output to {target}"))?;
        Ok(())
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_string(),
            Output::File(_, path) => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer, _) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer, _) => writer.flush(),
        }
    }
}

/// Read a survey export from a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed.
pub fn read_survey_file<P>(path: P) -> anyhow::Result<SurveyExport>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open survey export file: {}", path.display()))?;
    let reader = io::BufReader::new(file);
    let export = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse survey export JSON: {}", path.display()))?;
    Ok(export)
}
