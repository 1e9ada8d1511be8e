use crate::models::{ListingRecord, LISTING_HEADERS};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_FILE_STEM: &str = "indeed_jobs";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" | "jsonl" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        };
        f.write_str(name)
    }
}

/// Writes listing collections to files under one output directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    file_stem: String,
    timestamped: bool,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, DEFAULT_FILE_STEM, true)
    }
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>, timestamped: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
            timestamped,
        }
    }

    /// `<stem>[_<timestamp>].<ext>` inside the output directory
    pub fn file_path(&self, format: ExportFormat) -> PathBuf {
        let name = if self.timestamped {
            format!(
                "{}_{}.{}",
                self.file_stem,
                Local::now().format("%Y%m%d%H%M%S"),
                format.extension()
            )
        } else {
            format!("{}.{}", self.file_stem, format.extension())
        };
        self.output_dir.join(name)
    }

    /// Write `records` in the named format and return the file written.
    /// The format is validated before anything touches the filesystem.
    pub fn write(&self, records: &[ListingRecord], format: &str) -> Result<PathBuf, ExportError> {
        let format: ExportFormat = format.parse()?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.file_path(format);
        write_to(records, format, &path)?;
        log::info!("Data saved to {} ({})", path.display(), format);
        Ok(path)
    }
}

/// Write `records` to an explicit path, creating parent directories as needed
pub fn write_to(records: &[ListingRecord], format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    match format {
        ExportFormat::Csv => write_csv(records, path),
        ExportFormat::Json => write_json_lines(records, path),
        ExportFormat::Excel => write_workbook(records, path),
    }
}

fn write_csv(records: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(LISTING_HEADERS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json_lines(records: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn write_workbook(records: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Jobs")?;

    for (col, header) in LISTING_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in record.to_row().iter().enumerate() {
            sheet.write_string(row, col as u16, value.as_str())?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Errors that can occur while saving results
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format `{0}` (expected csv, json or excel)")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
