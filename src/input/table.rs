use std::io::BufRead;
use std::path::Path;

use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    /// (1-based line number, fields)
    pub rows: Vec<(usize, Vec<String>)>,
}

/// Delimiter from the file name (ignoring a trailing `.gz`), if it says.
pub fn delimiter_from_path(path: &Path) -> Option<Delimiter> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") {
        Some(Delimiter::Comma)
    } else if name.ends_with(".tsv") || name.ends_with(".txt") {
        Some(Delimiter::Tab)
    } else {
        None
    }
}

pub fn sniff_delimiter(header_line: &str) -> Delimiter {
    if header_line.contains('\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

pub fn read_table(
    reader: &mut dyn BufRead,
    delimiter: Option<Delimiter>,
) -> Result<RawTable, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;

    let header_line = loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            return Err(InputError::Parse("input table is empty".to_string()));
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if !line.trim().is_empty() {
            break line.trim_start_matches('\u{feff}').to_string();
        }
    };

    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&header_line));
    let header = split_record(&header_line, delimiter, line_no)?
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect::<Vec<_>>();
    if header.iter().all(|h| h.is_empty()) {
        return Err(InputError::Parse("input table header is empty".to_string()));
    }

    let mut rows = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line, delimiter, line_no)?;
        if fields.len() != header.len() {
            return Err(InputError::InvalidInput(format!(
                "line {} has {} fields, header has {}",
                line_no,
                fields.len(),
                header.len()
            )));
        }
        rows.push((line_no, fields));
    }

    Ok(RawTable { header, rows })
}

/// Splits one record. Fields may be double-quoted; `""` inside quotes is a
/// literal quote. Records may not span lines.
pub fn split_record(
    line: &str,
    delimiter: Delimiter,
    line_no: usize,
) -> Result<Vec<String>, InputError> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if ch == delim {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    if in_quotes {
        return Err(InputError::Parse(format!(
            "unterminated quoted field on line {}",
            line_no
        )));
    }
    fields.push(field);
    Ok(fields)
}

/// Parses one score cell. Empty and NA-style cells are missing (NaN).
pub fn parse_score(raw: &str) -> Option<f64> {
    let v = raw.trim();
    if is_missing_token(v) {
        return Some(f64::NAN);
    }
    v.parse::<f64>().ok()
}

fn is_missing_token(v: &str) -> bool {
    v.is_empty()
        || v.eq_ignore_ascii_case("na")
        || v.eq_ignore_ascii_case("nan")
        || v.eq_ignore_ascii_case("n/a")
}
