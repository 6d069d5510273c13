use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use shelf_core::{CatalogRowView, ExportFormat, Snapshot, COLUMN_HEADERS};
use shelf_logging::shelf_info;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub spreadsheet_filename: String,
    pub document_filename: String,
    pub document_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            spreadsheet_filename: "scanned_books.csv".to_string(),
            document_filename: "scanned_books.md".to_string(),
            document_title: "Scanned books".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the table held in `snapshot`, in display order, to `output_dir`.
pub fn export_snapshot(
    snapshot: Snapshot<'_>,
    format: ExportFormat,
    output_dir: &Path,
    options: &ExportOptions,
    generated_utc: &str,
) -> Result<ExportSummary, ExportError> {
    let rows: Vec<CatalogRowView> = snapshot.iter().map(CatalogRowView::from).collect();

    let (filename, content) = match format {
        ExportFormat::Spreadsheet => (&options.spreadsheet_filename, render_spreadsheet(&rows)?),
        ExportFormat::Document => (
            &options.document_filename,
            render_document(&rows, &options.document_title, generated_utc).into_bytes(),
        ),
    };

    let writer = AtomicFileWriter::new(output_dir);
    let output_path = writer.write(filename, &content)?;
    shelf_info!(
        "Exported {} rows as {} to {:?}",
        rows.len(),
        format.label(),
        output_path
    );

    Ok(ExportSummary {
        format,
        row_count: rows.len(),
        output_path,
    })
}

fn render_spreadsheet(rows: &[CatalogRowView]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

fn render_document(rows: &[CatalogRowView], title: &str, generated_utc: &str) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "# {title}\n");
    let _ = writeln!(doc, "generated_utc: {generated_utc}");
    let _ = writeln!(doc, "rows: {}\n", rows.len());

    push_table_row(&mut doc, COLUMN_HEADERS.iter().copied());
    push_table_row(&mut doc, COLUMN_HEADERS.iter().map(|_| "---"));
    for row in rows {
        let cells = row.cells();
        push_table_row(&mut doc, cells.iter().map(String::as_str));
    }
    doc
}

fn push_table_row<'a>(doc: &mut String, cells: impl Iterator<Item = &'a str>) {
    doc.push('|');
    for cell in cells {
        doc.push(' ');
        doc.push_str(&escape_cell(cell));
        doc.push_str(" |");
    }
    doc.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}
