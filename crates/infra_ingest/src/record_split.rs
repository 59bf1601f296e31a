//! Splitting quote records into retained and remaining fields

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{IngestError, IngestResult};

/// The two halves of a split record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitRecord {
    /// Retained fields of nested records, plus every entry that was not split
    pub retained: Map<String, Value>,
    /// All other fields of nested records, plus every entry that was not split
    pub remaining: Map<String, Value>,
}

/// Counters for a processed stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Records written to each output
    pub records: usize,
    /// Blank input lines skipped
    pub blank_lines: usize,
}

/// Splits one record
///
/// An entry whose value is an object holding at least one of `keys_to_retain`
/// is divided: the retained keys (in `keys_to_retain` order) go to
/// `retained`, the rest to `remaining`, and an empty side is left out.
/// Every other entry is copied unchanged to both sides.
pub fn split_record(record: &Map<String, Value>, keys_to_retain: &[String]) -> SplitRecord {
    let mut split = SplitRecord::default();

    for (key, value) in record {
        match value {
            Value::Object(fields) if keys_to_retain.iter().any(|k| fields.contains_key(k)) => {
                let retained: Map<String, Value> = keys_to_retain
                    .iter()
                    .filter_map(|k| fields.get(k).map(|v| (k.clone(), v.clone())))
                    .collect();
                let remaining: Map<String, Value> = fields
                    .iter()
                    .filter(|(k, _)| !keys_to_retain.contains(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();

                if !retained.is_empty() {
                    split.retained.insert(key.clone(), Value::Object(retained));
                }
                if !remaining.is_empty() {
                    split.remaining.insert(key.clone(), Value::Object(remaining));
                }
            }
            _ => {
                split.retained.insert(key.clone(), value.clone());
                split.remaining.insert(key.clone(), value.clone());
            }
        }
    }

    split
}

/// Splits a newline-delimited JSON stream
///
/// Writes one line to each output per non-blank input line, in input order.
/// Stops at the first malformed line; lines already written stay written.
pub fn split_stream<R, A, B>(
    reader: R,
    retained_out: &mut A,
    remaining_out: &mut B,
    keys_to_retain: &[String],
) -> IngestResult<SplitStats>
where
    R: BufRead,
    A: Write,
    B: Write,
{
    let mut stats = SplitStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        let parsed: Value = serde_json::from_str(trimmed).map_err(|source| IngestError::Parse {
            line: line_no,
            source,
        })?;
        let Value::Object(record) = parsed else {
            return Err(IngestError::NotAnObject { line: line_no });
        };

        let split = split_record(&record, keys_to_retain);
        write_line(retained_out, &split.retained, line_no)?;
        write_line(remaining_out, &split.remaining, line_no)?;

        stats.records += 1;
        debug!(line = line_no, keys = record.len(), "Record split");
    }

    retained_out.flush()?;
    remaining_out.flush()?;

    info!(
        records = stats.records,
        blank_lines = stats.blank_lines,
        "Record stream split"
    );
    Ok(stats)
}

/// Splits a newline-delimited JSON file into two files
///
/// Output files are created or truncated.
pub fn split_files(
    input: impl AsRef<Path>,
    retained_path: impl AsRef<Path>,
    remaining_path: impl AsRef<Path>,
    keys_to_retain: &[String],
) -> IngestResult<SplitStats> {
    let reader = BufReader::new(File::open(input.as_ref())?);
    let mut retained_out = BufWriter::new(File::create(retained_path.as_ref())?);
    let mut remaining_out = BufWriter::new(File::create(remaining_path.as_ref())?);

    debug!(input = %input.as_ref().display(), "Splitting record file");
    split_stream(reader, &mut retained_out, &mut remaining_out, keys_to_retain)
}

fn write_line<W: Write>(out: &mut W, record: &Map<String, Value>, line: usize) -> IngestResult<()> {
    serde_json::to_writer(&mut *out, record).map_err(|source| IngestError::Serialize { line, source })?;
    out.write_all(b"\n")?;
    Ok(())
}
