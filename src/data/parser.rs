use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use anyhow::{Result, anyhow};
use flate2::read::GzDecoder;

use crate::data::raw::AnnotatedText;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Parser for annotated-text records stored as JSON, JSON Lines, or gzipped JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadParser;

impl PayloadParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a JSON file (regular or gzipped)
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<AnnotatedText>> {
        let path = file_path.as_ref();
        let file = File::open(path)
            .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;

        // Check if file is gzipped by looking at magic bytes
        let mut reader = BufReader::new(file);
        let mut magic = [0u8; 2];
        let is_gzip = reader.read_exact(&mut magic).is_ok() && magic == GZIP_MAGIC;

        let file = File::open(path)?;
        let records = if is_gzip {
            self.parse_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            self.parse_reader(BufReader::new(file))?
        };

        log::debug!("Parsed {} record(s) from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse from a reader (single record, array of records, or JSON Lines)
    pub fn parse_reader<R: Read>(&self, mut reader: BufReader<R>) -> Result<Vec<AnnotatedText>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Parse a JSON string.
    ///
    /// Content whose first non-blank line is not a record on its own is
    /// treated as a single JSON document, so its error is the one reported.
    pub fn parse_str(&self, content: &str) -> Result<Vec<AnnotatedText>> {
        let single_err = match serde_json::from_str::<AnnotatedText>(content) {
            Ok(record) => return Ok(vec![record]),
            Err(e) => e,
        };

        let array_err = match serde_json::from_str::<Vec<AnnotatedText>>(content) {
            Ok(records) => return Ok(records),
            Err(e) => e,
        };

        // Fall back to line-by-line JSON (JSONL format)
        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AnnotatedText>(line) {
                Ok(record) => records.push(record),
                Err(_) if records.is_empty() => {
                    return Err(if content.trim_start().starts_with('[') {
                        anyhow!("Invalid record array: {}", array_err)
                    } else {
                        anyhow!("Invalid record: {}", single_err)
                    });
                }
                Err(e) => return Err(anyhow!("Invalid record on line {}: {}", line_no + 1, e)),
            }
        }
        Ok(records)
    }
}
