use defs::*;

// read-only lookups over a finished ingestion. The global vote total is
// taken once, when the queries are constructed.
pub struct ElectionQueries<'a> {
    data: &'a ElectionData,
    total_votes: u64,
}

impl<'a> ElectionQueries<'a> {
    pub fn new(data: &'a ElectionData) -> ElectionQueries<'a> {
        ElectionQueries {
            data,
            total_votes: data.total_party_votes(),
        }
    }

    pub fn data(&self) -> &'a ElectionData {
        self.data
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Candidates whose first name or surname equals `name`, ignoring case.
    /// `None` if nobody matches.
    pub fn find_candidates(&self, name: &str) -> Option<Vec<&'a Candidate>> {
        let matches: Vec<&Candidate> = self
            .data
            .candidates
            .iter()
            .filter(|c| c.answers_to(name))
            .collect();
        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }

    pub fn constituency_summary(&self, name: &str) -> Option<ConstituencySummary> {
        self.data.constituencies.get(name).map(|c| c.summary())
    }

    pub fn constituency_candidates(&self, name: &str) -> Option<Vec<&'a Candidate>> {
        self.data
            .constituencies
            .get(name)
            .map(|c| self.data.members(&c.members))
    }

    pub fn party_total_votes(&self, name: &str) -> Option<u64> {
        self.data.parties.get(name).map(|p| p.total_votes)
    }

    /// The party's share of all votes, as a percentage. When no votes were
    /// cast anywhere the share is reported as zero.
    pub fn party_percentage(&self, name: &str) -> Option<f64> {
        let party = self.data.parties.get(name)?;
        if self.total_votes == 0 {
            warn!("no votes recorded for any party; reporting {} as 0%", name);
            return Some(0.0);
        }
        Some(party.total_votes as f64 / self.total_votes as f64 * 100.0)
    }

    pub fn party_candidates(&self, name: &str) -> Option<Vec<&'a Candidate>> {
        self.data
            .parties
            .get(name)
            .map(|p| self.data.members(&p.members))
    }
}
