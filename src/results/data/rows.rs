//
// Turn one row of the general election results CSV into a Candidate.
//
// Results files are published in a mix of UTF-8 and Windows/ISO-8859-1
// encodings, so fields are decoded one at a time.
//

use std::collections::HashMap;
use std::str;

use configuration::Config;
use csv::ByteRecord;
use defs::{Candidate, Gender};
use error::RowError;

pub const DEFAULT_PARTY: &str = "Independent";

// one data row, keyed by header
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Pair each field with its header. Short rows simply lack the trailing
    /// columns; surplus fields are dropped.
    pub fn from_record(headers: &[String], record: &ByteRecord) -> Row {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), decode_field(v)))
            .collect();
        Row { fields }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Row {
        Row {
            fields: pairs
                .iter()
                .map(|&(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }

    fn get_or<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        self.get(column).unwrap_or(default)
    }
}

/// Decode as UTF-8 where possible, otherwise as ISO-8859-1 (every byte maps
/// to the code point of the same value).
pub fn decode_field(bytes: &[u8]) -> String {
    match str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn parse_count(column: &str, value: &str) -> Result<u64, RowError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<u64>().map_err(|_| RowError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub candidate: Candidate,
    // only consulted when the row introduces a new constituency
    pub electorate: Option<String>,
    // the header votes were read from; None when the party cell was blank
    pub vote_column: Option<String>,
}

impl ParsedRow {
    pub fn electorate(&self, column: &str) -> Result<u64, RowError> {
        match self.electorate {
            Some(ref v) => parse_count(column, v),
            None => Ok(0),
        }
    }
}

pub fn parse_row(row: &Row, config: &Config) -> Result<ParsedRow, RowError> {
    let columns = &config.columns;
    for required in &columns.required {
        if row.get(required).is_none() {
            return Err(RowError::MissingColumn(required.clone()));
        }
    }

    let gender = match row.get(&columns.gender) {
        Some(g) => Gender::normalise(g),
        None => Gender::Unknown,
    };

    // a blank party polls nothing; "Independent" is only its key
    let (party, vote_column) = match row.get(&columns.party) {
        Some(p) if !p.is_empty() => (p.to_string(), Some(config.vote_column(p).to_string())),
        _ => (DEFAULT_PARTY.to_string(), None),
    };

    let votes_cast = match vote_column {
        Some(ref column) => match row.get(column) {
            Some(v) => parse_count(column, v)?,
            None => 0,
        },
        None => 0,
    };

    Ok(ParsedRow {
        candidate: Candidate {
            first_name: row.get_or(&columns.first_name, "").to_string(),
            surname: row.get_or(&columns.surname, "").to_string(),
            gender,
            constituency: row.get_or(&columns.constituency, "").to_string(),
            party,
            votes_cast,
        },
        electorate: row.get(&columns.electorate).map(|e| e.to_string()),
        vote_column,
    })
}
