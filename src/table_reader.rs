use crate::error::{HweError, Result};
use crate::types::VariantRecord;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_ID_COLUMN: &str = "rsid";
pub const HOM_REF_COLUMN: &str = "ref.ref";
pub const HET_COLUMN: &str = "ref.alt";
pub const HOM_ALT_COLUMN: &str = "alt.alt";

/// Column positions resolved from the header line
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    id: usize,
    hom_ref: usize,
    het: usize,
    hom_alt: usize,
}

impl ColumnLayout {
    fn from_header(fields: &[&str], id_column: &str) -> Result<Self> {
        let find = |name: &str| {
            fields
                .iter()
                .position(|&f| f == name)
                .ok_or_else(|| HweError::MissingColumn {
                    column: name.to_string(),
                    available: fields.join(", "),
                })
        };

        Ok(Self {
            id: find(id_column)?,
            hom_ref: find(HOM_REF_COLUMN)?,
            het: find(HET_COLUMN)?,
            hom_alt: find(HOM_ALT_COLUMN)?,
        })
    }

    fn min_fields(&self) -> usize {
        self.id.max(self.hom_ref).max(self.het).max(self.hom_alt) + 1
    }
}

/// Open a plain or gzip-compressed text file.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a whitespace-delimited genotype count table from `path`.
pub fn read_genotype_table(path: &Path, id_column: &str) -> Result<Vec<VariantRecord>> {
    let reader = open_reader(path)?;
    parse_genotype_table(reader, id_column)
}

/// Parse a whitespace-delimited genotype count table.
///
/// The first non-blank, non-`#` line is the header. Fields may be separated by
/// any run of spaces or tabs. Columns other than the identifier and the three
/// genotype counts are ignored.
pub fn parse_genotype_table<R: BufRead>(reader: R, id_column: &str) -> Result<Vec<VariantRecord>> {
    let mut layout: Option<ColumnLayout> = None;
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();

        let cols = match layout {
            Some(cols) => cols,
            None => {
                layout = Some(ColumnLayout::from_header(&fields, id_column)?);
                continue;
            }
        };

        if fields.len() < cols.min_fields() {
            return Err(HweError::FieldCount {
                line: line_num,
                expected: cols.min_fields(),
                found: fields.len(),
            });
        }

        let count = |col: usize, name: &str| -> Result<u32> {
            parse_count(fields[col]).ok_or_else(|| HweError::InvalidCount {
                line: line_num,
                column: name.to_string(),
                value: fields[col].to_string(),
            })
        };

        records.push(VariantRecord {
            id: fields[cols.id].to_string(),
            hom_ref: count(cols.hom_ref, HOM_REF_COLUMN)?,
            het: count(cols.het, HET_COLUMN)?,
            hom_alt: count(cols.hom_alt, HOM_ALT_COLUMN)?,
        });
    }

    if layout.is_none() {
        return Err(HweError::MissingHeader);
    }
    if records.is_empty() {
        return Err(HweError::EmptyTable);
    }

    Ok(records)
}

/// Parse a non-negative integer count. Accepts integral floats such as `12.0`.
fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    let v: f64 = raw.parse().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}
