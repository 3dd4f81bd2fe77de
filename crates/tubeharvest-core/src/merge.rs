//! Consolidation of per-keyword result files
//!
//! Reads every CSV file in a directory, tags each row with the keyword its
//! file was named after, and keeps the first row seen for every video id.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HarvestError, Result};

/// Default name of the merged file
pub const CONSOLIDATED_FILE_NAME: &str = "consolidated.csv";

/// Column holding the source keyword in the merged file
pub const KEYWORD_COLUMN: &str = "keyword";

const ID_COLUMN: &str = "video_id";
const UTF8_BOM: &str = "\u{feff}";

/// Outcome of a directory merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Input files in the order they were read
    pub files: Vec<PathBuf>,
    /// Rows across all input files
    pub input_rows: usize,
    /// Rows left after removing duplicate ids
    pub output_rows: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
struct TaggedRow {
    keyword: String,
    values: Vec<String>,
}

/// Union of several result tables, deduplicated by video id
///
/// Columns keep the order in which they were first seen; the keyword column
/// is always last. Rows from files lacking a column are left empty there.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedDataset {
    columns: Vec<String>,
    rows: Vec<TaggedRow>,
    seen_ids: HashSet<String>,
    input_rows: usize,
}

impl ConsolidatedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of one CSV table
    ///
    /// # Arguments
    /// * `keyword` - Keyword stamped on every row of this table
    /// * `source` - Name used in error messages
    /// * `content` - CSV text with a header row, optionally BOM-prefixed
    ///
    /// # Returns
    /// Number of rows read from the table, duplicates included
    ///
    /// # Errors
    /// - `MissingColumn` if the table has no `video_id` column
    /// - `Csv` if the table is malformed
    pub fn add_table(&mut self, keyword: &str, source: &str, content: &str) -> Result<usize> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let headers = reader.headers()?.clone();

        let id_index = headers
            .iter()
            .position(|h| h == ID_COLUMN)
            .ok_or_else(|| HarvestError::MissingColumn {
                column: ID_COLUMN.to_string(),
                path: source.to_string(),
            })?;

        // An existing keyword column is replaced by the one derived here.
        let targets: Vec<Option<usize>> = headers
            .iter()
            .map(|h| (h != KEYWORD_COLUMN).then(|| self.column_index(h)))
            .collect();

        let mut read = 0;
        for record in reader.records() {
            let record = record?;
            read += 1;

            let id = record.get(id_index).unwrap_or_default();
            if !self.seen_ids.insert(id.to_string()) {
                continue;
            }

            let mut values = vec![String::new(); self.columns.len()];
            for (field, target) in record.iter().zip(&targets) {
                if let Some(index) = target {
                    values[*index] = field.to_string();
                }
            }
            self.rows.push(TaggedRow {
                keyword: keyword.to_string(),
                values,
            });
        }

        self.input_rows += read;
        Ok(read)
    }

    /// Read and append one CSV file, keyword taken from its name
    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        let keyword = keyword_from_path(path).ok_or_else(|| {
            HarvestError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("cannot derive keyword from {}", path.display()),
            ))
        })?;
        let content = fs::read_to_string(path)?;
        let read = self.add_table(&keyword, &path.display().to_string(), &content)?;
        debug!(path = %path.display(), keyword = %keyword, rows = read, "Read result file");
        Ok(read)
    }

    /// Header of the merged table
    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(KEYWORD_COLUMN))
            .collect()
    }

    /// Rows of the merged table, padded to the full header
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|row| {
            (0..self.columns.len())
                .map(|i| row.values.get(i).map(String::as_str).unwrap_or(""))
                .chain(std::iter::once(row.keyword.as_str()))
                .collect()
        })
    }

    /// Rows kept after deduplication
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows read before deduplication
    pub fn input_rows(&self) -> usize {
        self.input_rows
    }

    /// Write the merged table as UTF-8 CSV with a leading BOM
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(UTF8_BOM.as_bytes())?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for row in self.rows() {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    fn column_index(&mut self, name: &str) -> usize {
        match self.columns.iter().position(|c| c == name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        }
    }
}

/// Keyword encoded in a result file name (the name without its extension)
///
/// Hidden files such as `.csv` yield no keyword.
///
/// # Example
/// ```
/// use std::path::Path;
/// use tubeharvest_core::merge::keyword_from_path;
/// assert_eq!(keyword_from_path(Path::new("out/cats.csv")), Some("cats".to_string()));
/// ```
pub fn keyword_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty() && !stem.starts_with('.'))
        .map(str::to_string)
}

/// CSV files of `dir` in file name order, skipping `exclude`
pub fn list_input_files(dir: &Path, exclude: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let is_output = path.file_name().and_then(|n| n.to_str()) == Some(exclude);
        if is_csv && !is_output && keyword_from_path(&path).is_some() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Merge every result file in `dir` into `dir/consolidated.csv`
pub fn merge_directory(dir: impl AsRef<Path>) -> Result<MergeSummary> {
    merge_directory_to(dir, CONSOLIDATED_FILE_NAME)
}

/// Merge every result file in `dir` into `dir/<output_name>`
///
/// All inputs are read before anything is written; any read error aborts
/// the merge without output.
///
/// # Errors
/// - `Io` if the directory or a file cannot be read, or the output cannot be written
/// - `NoInputFiles` if the directory holds no CSV files
/// - `MissingColumn` / `Csv` if an input file is malformed
pub fn merge_directory_to(dir: impl AsRef<Path>, output_name: &str) -> Result<MergeSummary> {
    let dir = dir.as_ref();
    let files = list_input_files(dir, output_name)?;
    if files.is_empty() {
        return Err(HarvestError::NoInputFiles(dir.display().to_string()));
    }

    let mut dataset = ConsolidatedDataset::new();
    for file in &files {
        dataset.add_file(file)?;
    }

    info!(
        files = files.len(),
        rows = dataset.input_rows(),
        "Loaded result files"
    );

    let mut buffer = Vec::new();
    dataset.write_to(&mut buffer)?;
    let output_path = dir.join(output_name);
    fs::write(&output_path, buffer)?;

    info!(
        rows = dataset.len(),
        duplicates = dataset.input_rows() - dataset.len(),
        path = %output_path.display(),
        "Wrote consolidated file"
    );

    Ok(MergeSummary {
        files,
        input_rows: dataset.input_rows(),
        output_rows: dataset.len(),
        output_path,
    })
}
