//! File sinks for a simulator run: an optional per-match JSONL detail
//! stream and an always-on CSV summary.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, MatchMetrics};
use crate::types::OutputFormat;

/// Failure while creating or writing run artifacts.
#[derive(Debug)]
pub enum OutputError {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "output io error: {e}"),
            OutputError::Csv(e) => write!(f, "summary csv error: {e}"),
            OutputError::Json(e) => write!(f, "metrics encoding error: {e}"),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<csv::Error> for OutputError {
    fn from(e: csv::Error) -> Self {
        OutputError::Csv(e)
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(e: serde_json::Error) -> Self {
        OutputError::Json(e)
    }
}

/// Detail stream backing: plain text flushed per match, or gzip with the
/// trailer written on `finish`.
enum DetailStream {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl DetailStream {
    fn open(path: &Path, compress: bool) -> Result<Self, OutputError> {
        let file = BufWriter::new(File::create(path)?);
        Ok(if compress {
            DetailStream::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            DetailStream::Plain(file)
        })
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            DetailStream::Plain(w) => {
                writeln!(w, "{line}")?;
                w.flush()
            }
            DetailStream::Gzip(w) => writeln!(w, "{line}"),
        }
    }

    fn finish(self) -> io::Result<()> {
        match self {
            DetailStream::Plain(mut w) => w.flush(),
            DetailStream::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

/// Writes one [`MatchMetrics`] per simulated match into the run's artifact
/// files under the output directory.
pub struct OutputWriter {
    detail: Option<(DetailStream, PathBuf)>,
    summary: csv::Writer<BufWriter<File>>,
    summary_path: PathBuf,
}

impl OutputWriter {
    pub fn create(
        output_dir: &str,
        format: OutputFormat,
        compress: bool,
    ) -> Result<Self, OutputError> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;
        let stamp = run_stamp();

        let detail = match format {
            OutputFormat::Jsonl => {
                let name = if compress {
                    format!("matches_{stamp}.jsonl.gz")
                } else {
                    format!("matches_{stamp}.jsonl")
                };
                let path = dir.join(name);
                Some((DetailStream::open(&path, compress)?, path))
            }
            OutputFormat::Csv => None,
        };

        // Header row comes from the CsvSummaryRow field names on the first
        // serialize call.
        let summary_path = dir.join(format!("matches_{stamp}_summary.csv"));
        let summary = csv::Writer::from_writer(BufWriter::new(File::create(&summary_path)?));

        Ok(Self {
            detail,
            summary,
            summary_path,
        })
    }

    pub fn write_match(&mut self, metrics: &MatchMetrics) -> Result<(), OutputError> {
        if let Some((stream, _)) = &mut self.detail {
            stream.write_line(&serde_json::to_string(metrics)?)?;
        }
        self.summary.serialize(CsvSummaryRow::from(metrics))?;
        self.summary.flush()?;
        Ok(())
    }

    /// Flush both sinks and write the gzip trailer when one is open.
    pub fn finish(self) -> Result<(), OutputError> {
        if let Some((stream, _)) = self.detail {
            stream.finish()?;
        }
        let mut summary = self.summary;
        summary.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&Path>, &Path) {
        (
            self.detail.as_ref().map(|(_, path)| path.as_path()),
            &self.summary_path,
        )
    }
}

/// Filesystem-safe UTC timestamp for this run's filenames.
fn run_stamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| String::from("unknown"))
        .replace(':', "-")
}
