use shelf_core::ExportFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    /// A barcode typed by the scanner, separators removed.
    Code(String),
    Toggle,
    Export(ExportFormat),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub(crate) const HELP: &str = "\
Commands:
  toggle | t     switch the scanner on or off
  sheet  | xlsx  export the table as a spreadsheet (CSV)
  doc    | pdf   export the table as a document (Markdown)
  help   | h     show this help
  quit   | q     exit
Scanned barcodes (ISBN-10/13) are read while the scanner is on.";

pub(crate) fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if let Some(code) = parse_code(trimmed) {
        return Input::Code(code);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "toggle" | "t" => Input::Toggle,
        "sheet" | "xlsx" | "csv" => Input::Export(ExportFormat::Spreadsheet),
        "doc" | "pdf" | "md" => Input::Export(ExportFormat::Document),
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

// Scanners may emit hyphenated or spaced ISBNs; ISBN-10 can end in X.
fn parse_code(text: &str) -> Option<String> {
    let code: String = text
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !code.is_ascii() {
        return None;
    }
    let (body, last) = code.split_at(code.len().checked_sub(1)?);
    let digits_ok = body.bytes().all(|b| b.is_ascii_digit());
    let valid = match code.len() {
        13 => digits_ok && last.bytes().all(|b| b.is_ascii_digit()),
        10 => digits_ok && last.bytes().all(|b| b.is_ascii_digit() || b == b'X'),
        _ => false,
    };
    valid.then_some(code)
}
