use std::path::Path;

use configuration::Config;
use defs::*;
use error::RowError;
use num_format::{Locale, ToFormattedString};
use results::data::load::{self, IngestReport};
use results::data::rows::ParsedRow;

// accumulates candidates into the party and constituency maps; grow-only,
// each candidate is added exactly once
pub struct ElectionBuilder {
    data: ElectionData,
    // sum over every candidate; bounds each party and constituency total
    total_votes: u64,
}

impl ElectionBuilder {
    pub fn new() -> ElectionBuilder {
        ElectionBuilder {
            data: ElectionData::new(),
            total_votes: 0,
        }
    }

    /// Add one parsed row. The constituency's electorate is only read from
    /// the row that first mentions the constituency; if it fails to parse,
    /// nothing is recorded for the row. The same holds for a row whose votes
    /// would overflow the running totals.
    pub fn add(&mut self, row: ParsedRow, electorate_column: &str) -> Result<CandidateIndex, RowError> {
        let electorate = if self.data.constituencies.contains(&row.candidate.constituency) {
            None
        } else {
            Some(row.electorate(electorate_column)?)
        };
        self.add_candidate(row.candidate, electorate.unwrap_or(0))
    }

    /// `total_voters` is only used if this candidate introduces a new
    /// constituency.
    pub fn add_candidate(&mut self, candidate: Candidate, total_voters: u64) -> Result<CandidateIndex, RowError> {
        // no party or constituency total can exceed the overall total, so
        // once this passes neither update below can fail
        let total_votes = add_votes(self.total_votes, candidate.votes_cast)?;
        let idx = CandidateIndex(self.data.candidates.len());

        self.data
            .parties
            .entry_or_insert_with(&candidate.party, || Party::new(&candidate.party))
            .add_candidate(idx, &candidate)?;

        self.data
            .constituencies
            .entry_or_insert_with(&candidate.constituency, || {
                Constituency::new(&candidate.constituency, total_voters)
            })
            .add_candidate(idx, &candidate)?;

        self.data.candidates.push(candidate);
        self.total_votes = total_votes;
        Ok(idx)
    }

    pub fn finish(self) -> ElectionData {
        self.data
    }
}

impl Default for ElectionBuilder {
    fn default() -> ElectionBuilder {
        ElectionBuilder::new()
    }
}

/// Read the results file at `filename`. Ingestion is best-effort: failures
/// are logged and whatever was accumulated is returned, possibly nothing.
pub fn ingest(filename: &Path, config: &Config) -> (ElectionData, IngestReport) {
    let mut builder = ElectionBuilder::new();
    let mut report = IngestReport::default();

    let result = load::open(filename)
        .and_then(|input| load::load(input, config, &mut builder, &mut report));
    if let Err(e) = result {
        error!("unable to read {}: {}", filename.display(), e);
        report.source_error = Some(e.to_string());
    }

    let data = builder.finish();
    info!(
        "read {} rows ({} skipped): {} candidates, {} parties, {} constituencies, {} votes",
        report.rows_read,
        report.rows_skipped,
        data.candidates.len(),
        data.parties.len(),
        data.constituencies.len(),
        data.total_party_votes().to_formatted_string(&Locale::en)
    );
    (data, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use results::data::rows::{parse_row, Row};

    fn candidate(surname: &str, constituency: &str, party: &str, votes: u64) -> Candidate {
        Candidate {
            first_name: "Test".to_string(),
            surname: surname.to_string(),
            gender: Gender::Unknown,
            constituency: constituency.to_string(),
            party: party.to_string(),
            votes_cast: votes,
        }
    }

    #[test]
    fn totals_match_member_sums() {
        let mut builder = ElectionBuilder::new();
        builder.add_candidate(candidate("A", "North", "Red", 10), 100).unwrap();
        builder.add_candidate(candidate("B", "South", "Blue", 20), 200).unwrap();
        builder.add_candidate(candidate("C", "North", "Blue", 5), 999).unwrap();
        builder.add_candidate(candidate("D", "South", "Red", 7), 0).unwrap();
        let data = builder.finish();

        for party in data.parties.iter() {
            let sum: u64 = data
                .candidates
                .iter()
                .filter(|c| c.party == party.name)
                .map(|c| c.votes_cast)
                .sum();
            assert_eq!(party.total_votes, sum);
        }
        for constituency in data.constituencies.iter() {
            let sum: u64 = data
                .candidates
                .iter()
                .filter(|c| c.constituency == constituency.name)
                .map(|c| c.votes_cast)
                .sum();
            assert_eq!(constituency.total_votes_cast, sum);
        }
        assert_eq!(data.parties.names(), vec!["Red", "Blue"]);
        assert_eq!(data.constituencies.names(), vec!["North", "South"]);
        assert_eq!(
            data.parties.get("Blue").unwrap().members,
            vec![CandidateIndex(1), CandidateIndex(2)]
        );
    }

    #[test]
    fn electorate_comes_from_first_row() {
        let config = Config::default();
        let mut builder = ElectionBuilder::new();
        for electorate in &["500", "900", "garbage"] {
            let row = Row::from_pairs(&[
                ("Constituency name", "Bath"),
                ("First party", "LD"),
                ("LD", "3"),
                ("Electorate", *electorate),
            ]);
            let parsed = parse_row(&row, &config).unwrap();
            builder.add(parsed, &config.columns.electorate).unwrap();
        }
        let data = builder.finish();
        let bath = data.constituencies.get("Bath").unwrap();
        assert_eq!(bath.total_voters, 500);
        assert_eq!(bath.total_votes_cast, 9);
        assert_eq!(bath.members.len(), 3);
    }

    #[test]
    fn bad_electorate_on_new_constituency_records_nothing() {
        let config = Config::default();
        let mut builder = ElectionBuilder::new();
        let row = Row::from_pairs(&[
            ("Constituency name", "Bath"),
            ("First party", "LD"),
            ("Electorate", "many"),
        ]);
        let parsed = parse_row(&row, &config).unwrap();
        assert!(builder.add(parsed, &config.columns.electorate).is_err());
        let data = builder.finish();
        assert!(data.candidates.is_empty());
        assert!(data.parties.is_empty());
        assert!(data.constituencies.is_empty());
    }

    #[test]
    fn overflowing_votes_skip_the_row() {
        let mut builder = ElectionBuilder::new();
        builder
            .add_candidate(candidate("A", "North", "Lab", u64::max_value()), 10)
            .unwrap();
        match builder.add_candidate(candidate("B", "South", "Con", 1), 20) {
            Err(RowError::VoteOverflow { votes }) => assert_eq!(votes, 1),
            other => panic!("unexpected {:?}", other),
        }
        let data = builder.finish();
        assert_eq!(data.candidates.len(), 1);
        assert_eq!(data.parties.names(), vec!["Lab"]);
        assert_eq!(data.constituencies.names(), vec!["North"]);
        assert_eq!(data.total_party_votes(), u64::max_value());
    }

    #[test]
    fn missing_file_yields_empty_data() {
        let (data, report) = ingest(Path::new("/nonexistent/results.csv"), &Config::default());
        assert!(data.candidates.is_empty());
        assert!(data.parties.is_empty());
        assert!(report.source_error.is_some());
    }
}
