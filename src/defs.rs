/*
 * core types
 */

use std::collections::HashMap;
use std::fmt;

use error::RowError;

// represents a candidate's position in the flat roster held by
// ElectionData; ranges from 0..N-1 where N is the number of candidates
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
pub struct CandidateIndex(pub usize);

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
    // any other value, capitalised
    Other(String),
}

impl Gender {
    pub fn normalise(raw: &str) -> Gender {
        match capitalise(raw.trim()).as_str() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            "Unknown" => Gender::Unknown,
            other => Gender::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Unknown => write!(f, "Unknown"),
            Gender::Other(ref s) => write!(f, "{}", s),
        }
    }
}

/// First character upper case, the remainder lower case.
pub fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub first_name: String,
    pub surname: String,
    pub gender: Gender,
    pub constituency: String,
    pub party: String,
    pub votes_cast: u64,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }

    /// Case-insensitive equality against either the first name or the surname.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.first_name.to_lowercase() == name || self.surname.to_lowercase() == name
    }
}

pub fn add_votes(total: u64, votes: u64) -> Result<u64, RowError> {
    total
        .checked_add(votes)
        .ok_or(RowError::VoteOverflow { votes })
}

pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize)]
pub struct Party {
    pub name: String,
    pub members: Vec<CandidateIndex>,
    pub total_votes: u64,
}

impl Party {
    pub fn new(name: &str) -> Party {
        Party {
            name: name.to_string(),
            members: Vec::new(),
            total_votes: 0,
        }
    }

    pub fn add_candidate(&mut self, idx: CandidateIndex, candidate: &Candidate) -> Result<(), RowError> {
        self.total_votes = add_votes(self.total_votes, candidate.votes_cast)?;
        self.members.push(idx);
        Ok(())
    }
}

impl Named for Party {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Constituency {
    pub name: String,
    pub total_voters: u64,
    pub members: Vec<CandidateIndex>,
    pub total_votes_cast: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstituencySummary {
    pub name: String,
    pub total_voters: u64,
    pub total_votes_cast: u64,
}

impl Constituency {
    pub fn new(name: &str, total_voters: u64) -> Constituency {
        Constituency {
            name: name.to_string(),
            total_voters,
            members: Vec::new(),
            total_votes_cast: 0,
        }
    }

    pub fn add_candidate(&mut self, idx: CandidateIndex, candidate: &Candidate) -> Result<(), RowError> {
        self.total_votes_cast = add_votes(self.total_votes_cast, candidate.votes_cast)?;
        self.members.push(idx);
        Ok(())
    }

    pub fn summary(&self) -> ConstituencySummary {
        ConstituencySummary {
            name: self.name.clone(),
            total_voters: self.total_voters,
            total_votes_cast: self.total_votes_cast,
        }
    }
}

impl Named for Constituency {
    fn name(&self) -> &str {
        &self.name
    }
}

// entries keyed by name, iterated in the order they were first inserted
#[derive(Debug, Clone)]
pub struct NameIndex<T> {
    entries: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T: Named> NameIndex<T> {
    pub fn new() -> NameIndex<T> {
        NameIndex {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.positions.get(name).map(|&p| &self.entries[p])
    }

    /// Returns the entry for `name`, creating it with `create` if this is
    /// the first time the name has been seen.
    pub fn entry_or_insert_with<F>(&mut self, name: &str, create: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let p = match self.positions.get(name) {
            Some(&p) => p,
            None => {
                self.entries.push(create());
                let p = self.entries.len() - 1;
                self.positions.insert(name.to_string(), p);
                p
            }
        };
        &mut self.entries[p]
    }

    pub fn iter(&self) -> ::std::slice::Iter<T> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }
}

impl<T: Named> Default for NameIndex<T> {
    fn default() -> NameIndex<T> {
        NameIndex::new()
    }
}

// everything produced by a single ingestion pass; owned by the query and
// reporting layers once ingestion completes
#[derive(Debug, Clone, Default)]
pub struct ElectionData {
    pub candidates: Vec<Candidate>,
    pub parties: NameIndex<Party>,
    pub constituencies: NameIndex<Constituency>,
}

impl ElectionData {
    pub fn new() -> ElectionData {
        ElectionData::default()
    }

    pub fn candidate(&self, idx: CandidateIndex) -> &Candidate {
        &self.candidates[idx.0]
    }

    pub fn members<'a>(&'a self, indexes: &'a [CandidateIndex]) -> Vec<&'a Candidate> {
        indexes.iter().map(|idx| self.candidate(*idx)).collect()
    }

    pub fn total_party_votes(&self) -> u64 {
        self.parties
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.total_votes))
    }
}
