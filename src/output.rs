use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use defs::ElectionData;
use error::Error;

const SEPARATOR_WIDTH: usize = 40;

struct PartyLine {
    name: String,
    total_votes: u64,
}

struct ConstituencyLine {
    name: String,
    total_voters: u64,
    total_votes_cast: u64,
}

pub struct SummaryOutput {
    path: PathBuf,
    parties: Vec<PartyLine>,
    constituencies: Vec<ConstituencyLine>,
}

pub trait SummaryOutputWriter {
    fn new(path: &Path) -> Self;
    fn set_statistics(&mut self, data: &ElectionData);
    fn render(&self) -> String;
    fn close(&self) -> Result<(), Error>;
}

impl SummaryOutputWriter for SummaryOutput {
    fn new(path: &Path) -> SummaryOutput {
        SummaryOutput {
            path: path.to_path_buf(),
            parties: Vec::new(),
            constituencies: Vec::new(),
        }
    }

    fn set_statistics(&mut self, data: &ElectionData) {
        self.parties = data
            .parties
            .iter()
            .map(|p| PartyLine {
                name: p.name.clone(),
                total_votes: p.total_votes,
            })
            .collect();
        self.constituencies = data
            .constituencies
            .iter()
            .map(|c| ConstituencyLine {
                name: c.name.clone(),
                total_voters: c.total_voters,
                total_votes_cast: c.total_votes_cast,
            })
            .collect();
    }

    fn render(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = writeln!(out, "Election Results Summary");
        let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
        let _ = writeln!(out, "Party Statistics:");
        for p in &self.parties {
            let _ = writeln!(out, "{}: {} votes", p.name, p.total_votes);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Constituency Statistics:");
        for c in &self.constituencies {
            let _ = writeln!(
                out,
                "{}: {} registered voters, {} votes cast",
                c.name, c.total_voters, c.total_votes_cast
            );
        }
        let _ = writeln!(out);
        out
    }

    fn close(&self) -> Result<(), Error> {
        let mut fd = File::create(&self.path)?;
        fd.write_all(self.render().as_bytes())?;
        info!(
            "wrote statistics for {} parties and {} constituencies to {}",
            self.parties.len(),
            self.constituencies.len(),
            self.path.display()
        );
        Ok(())
    }
}

pub fn save_statistics(data: &ElectionData, path: &Path) -> Result<(), Error> {
    let mut output = SummaryOutput::new(path);
    output.set_statistics(data);
    output.close()
}
