use std::path::Path;

use tokio::{
    fs::File,
    io::{AsyncWrite, AsyncWriteExt, BufWriter},
};

use crate::{
    Res,
    types::{TRACK_ROW_HEADER, TrackRow},
};

/// Separator written after every field, including the last one of a line.
pub const FIELD_DELIMITER: &str = "; ";

/// Writes the dataset: one header line, then one line per track.
///
/// Every line is flushed as soon as it is written, so an interrupted run
/// leaves all rows written so far on disk.
pub struct DatasetWriter<W> {
    out: W,
    rows: usize,
}

impl DatasetWriter<BufWriter<File>> {
    /// Creates (or truncates) the dataset file, creating parent directories.
    pub async fn create(path: &Path) -> Res<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }
        let file = File::create(path).await?;
        Ok(DatasetWriter::new(BufWriter::new(file)))
    }
}

impl<W: AsyncWrite + Unpin> DatasetWriter<W> {
    pub fn new(out: W) -> Self {
        DatasetWriter { out, rows: 0 }
    }

    pub async fn write_header(&mut self) -> Res<()> {
        let line = format_line(TRACK_ROW_HEADER.iter().copied());
        self.write_line(&line).await
    }

    pub async fn write_row(&mut self, row: &TrackRow) -> Res<()> {
        let values = row.values();
        let line = format_line(values.iter().map(String::as_str));
        self.write_line(&line).await?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and closes the output, handing back the underlying writer.
    pub async fn finish(mut self) -> Res<W> {
        self.out.flush().await?;
        self.out.shutdown().await?;
        Ok(self.out)
    }

    async fn write_line(&mut self, line: &str) -> Res<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

fn format_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for field in fields {
        line.push_str(&escape_field(field));
        line.push_str(FIELD_DELIMITER);
    }
    line.push('\n');
    line
}

// Values must not add columns or lines.
fn escape_field(value: &str) -> String {
    value
        .replace(';', ",")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Splits a dataset line back into its fields.
pub fn split_line(line: &str) -> Vec<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix(FIELD_DELIMITER).unwrap_or(line);
    line.split(FIELD_DELIMITER).collect()
}
