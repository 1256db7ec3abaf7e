//
// Read a general election results CSV, one candidate per row.
// Files ending in .gz are decompressed on the fly.
//

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use aggregate::ElectionBuilder;
use configuration::Config;
use csv;
use error::{Error, RowError};
use flate2::read::GzDecoder;
use results::data::rows::{decode_field, parse_row, Row};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_skipped: usize,
    // parties whose vote column is absent from the header, first seen first
    pub missing_vote_columns: Vec<String>,
    // set when the input could not be opened or its header read
    pub source_error: Option<String>,
}

impl IngestReport {
    pub fn rows_accepted(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_skipped)
    }
}

pub fn open(filename: &Path) -> Result<Box<dyn Read>, Error> {
    let f = BufReader::new(File::open(filename)?);
    let gzipped = filename
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);
    if gzipped {
        Ok(Box::new(GzDecoder::new(f)))
    } else {
        Ok(Box::new(f))
    }
}

/// Feed every row of `input` into `builder`. Malformed rows are logged,
/// counted in `report` and skipped; only a failure to read the header is
/// returned as an error.
pub fn load<R: Read>(
    input: R,
    config: &Config,
    builder: &mut ElectionBuilder,
    report: &mut IngestReport,
) -> Result<(), Error> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = rdr.byte_headers()?.iter().map(decode_field).collect();
    let header_set: HashSet<&str> = headers.iter().map(|h| h.as_str()).collect();
    debug!("results file has {} columns", headers.len());

    let mut flagged: HashSet<String> = HashSet::new();

    for (idx, result) in rdr.byte_records().enumerate() {
        // data rows are numbered from 1, excluding the header
        let row_number = idx + 1;
        report.rows_read += 1;

        let outcome = result
            .map_err(RowError::from)
            .and_then(|record| parse_row(&Row::from_record(&headers, &record), config))
            .and_then(|parsed| {
                let party = parsed.candidate.party.clone();
                let column = parsed.vote_column.clone();
                builder.add(parsed, &config.columns.electorate)?;
                Ok((party, column))
            });

        match outcome {
            Ok((_, None)) => (),
            Ok((party, Some(column))) => {
                if !header_set.contains(column.as_str()) && !flagged.contains(&party) {
                    warn!(
                        "no vote column '{}' for party '{}'; its candidates are counted with zero votes",
                        column, party
                    );
                    flagged.insert(party.clone());
                    report.missing_vote_columns.push(party);
                }
            }
            Err(e) => {
                warn!("skipping row {}: {}", row_number, e);
                report.rows_skipped += 1;
            }
        }
    }
    Ok(())
}
