//
// Line-based interactive menu. Reads choices from any BufRead and writes to
// any Write, so the whole conversation can be driven from a test.
//

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chart::PieChart;
use defs::Candidate;
use output::save_statistics;
use query::ElectionQueries;

// what "Save and exit" does
#[derive(Debug, Clone)]
pub struct ExitActions {
    pub summary: PathBuf,
    pub chart: Option<PathBuf>,
    pub top_parties: usize,
}

enum Flow {
    Back,
    Quit,
}

pub struct Menu<'a, R, W> {
    queries: ElectionQueries<'a>,
    input: R,
    output: W,
    exit: ExitActions,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(queries: ElectionQueries<'a>, input: R, output: W, exit: ExitActions) -> Menu<'a, R, W> {
        Menu {
            queries,
            input,
            output,
            exit,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user saves and exits, or input ends (treated the same).
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Election Information System!")?;
        writeln!(self.output, "Please choose an option from the following menu:")?;
        loop {
            writeln!(self.output, "\nMain Menu")?;
            writeln!(self.output, "1. View Candidate Information")?;
            writeln!(self.output, "2. View Constituency Information")?;
            writeln!(self.output, "3. View Party Information")?;
            writeln!(self.output, "4. Save and exit program")?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(c) => c,
                None => break,
            };
            let flow = match choice.as_str() {
                "1" => self.candidate_menu()?,
                "2" => self.constituency_menu()?,
                "3" => self.party_menu()?,
                "4" => break,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Back
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        self.save_and_exit()
    }

    // None at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(None);
        }
        let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn write_candidates(&mut self, candidates: &[&Candidate]) -> io::Result<()> {
        for c in candidates {
            writeln!(
                self.output,
                "{} ({}) with {} votes.",
                c.full_name(),
                c.gender,
                c.votes_cast
            )?;
        }
        Ok(())
    }

    fn candidate_menu(&mut self) -> io::Result<Flow> {
        loop {
            writeln!(self.output, "\nCandidate Menu - Please choose an option:")?;
            writeln!(self.output, "1. View Candidate Data")?;
            writeln!(self.output, "2. View Candidate Votes")?;
            writeln!(self.output, "3. Back to Main Menu")?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(c) => c,
                None => return Ok(Flow::Quit),
            };
            match choice.as_str() {
                "1" | "2" => {
                    let name = match self.prompt("Enter candidate name (first/last): ")? {
                        Some(n) => n,
                        None => return Ok(Flow::Quit),
                    };
                    match self.queries.find_candidates(&name) {
                        Some(found) => for c in found {
                            if choice == "1" {
                                writeln!(
                                    self.output,
                                    "The candidate {} ({}) is from the {} party, representing the {} constituency.",
                                    c.full_name(),
                                    c.gender,
                                    c.party,
                                    c.constituency
                                )?;
                            } else {
                                writeln!(
                                    self.output,
                                    "Candidate: {} ({}), received {} votes.",
                                    c.full_name(),
                                    c.gender,
                                    c.votes_cast
                                )?;
                            }
                        },
                        None => writeln!(self.output, "Candidate not found.")?,
                    }
                }
                "3" => return Ok(Flow::Back),
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn constituency_menu(&mut self) -> io::Result<Flow> {
        loop {
            writeln!(self.output, "\nConstituency Menu - Please choose an option:")?;
            writeln!(self.output, "1. View Constituency Data")?;
            writeln!(self.output, "2. View MPs in a Constituency")?;
            writeln!(self.output, "3. Back to Main Menu")?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(c) => c,
                None => return Ok(Flow::Quit),
            };
            match choice.as_str() {
                "1" | "2" => {
                    let name = match self.prompt("Enter constituency name: ")? {
                        Some(n) => n,
                        None => return Ok(Flow::Quit),
                    };
                    if choice == "1" {
                        match self.queries.constituency_summary(&name) {
                            Some(s) => writeln!(
                                self.output,
                                "Constituency of {}, total of {} registered voters, of which {} votes have been cast.",
                                s.name, s.total_voters, s.total_votes_cast
                            )?,
                            None => writeln!(self.output, "Constituency not found.")?,
                        }
                    } else {
                        match self.queries.constituency_candidates(&name) {
                            Some(members) => {
                                writeln!(self.output, "MPs in {}: ", name)?;
                                self.write_candidates(&members)?;
                            }
                            None => writeln!(self.output, "Constituency not found.")?,
                        }
                    }
                }
                "3" => return Ok(Flow::Back),
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn party_menu(&mut self) -> io::Result<Flow> {
        loop {
            writeln!(self.output, "\nParty Menu - Please choose an option:")?;
            writeln!(self.output, "1. View Total Votes for a Party")?;
            writeln!(self.output, "2. View Party Percentage of Total Votes")?;
            writeln!(self.output, "3. View MPs in a Party")?;
            writeln!(self.output, "4. Back to Main Menu")?;
            let choice = match self.prompt("Enter your choice: ")? {
                Some(c) => c,
                None => return Ok(Flow::Quit),
            };
            if choice == "4" {
                return Ok(Flow::Back);
            }
            if choice != "1" && choice != "2" && choice != "3" {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            }
            let name = match self.prompt("Enter party name: ")? {
                Some(n) => n,
                None => return Ok(Flow::Quit),
            };
            if !self.queries.data().parties.contains(&name) {
                writeln!(self.output, "Party not found.")?;
                continue;
            }
            match choice.as_str() {
                "1" => {
                    if let Some(total) = self.queries.party_total_votes(&name) {
                        writeln!(
                            self.output,
                            "The {} party has received a total of {} votes.",
                            name, total
                        )?;
                    }
                }
                "2" => {
                    if let Some(pct) = self.queries.party_percentage(&name) {
                        writeln!(
                            self.output,
                            "The {} party secured {:.2}% of the total votes.",
                            name, pct
                        )?;
                    }
                }
                _ => {
                    if let Some(members) = self.queries.party_candidates(&name) {
                        writeln!(self.output, "MPs in {} party:", name)?;
                        self.write_candidates(&members)?;
                    }
                }
            }
        }
    }

    fn save_and_exit(&mut self) -> io::Result<()> {
        writeln!(self.output, "Exiting the program.")?;
        let data = self.queries.data();

        match save_statistics(data, &self.exit.summary) {
            Ok(()) => writeln!(
                self.output,
                "Statistics have been successfully saved to {}.",
                self.exit.summary.display()
            )?,
            Err(e) => {
                error!("unable to save statistics: {}", e);
                writeln!(self.output, "Error writing to file: {}", e)?;
            }
        }

        if let Some(ref path) = self.exit.chart {
            let chart = PieChart::from_parties(&data.parties, self.exit.top_parties);
            match chart.write(path) {
                Ok(()) => writeln!(self.output, "Chart saved to {}.", path.display())?,
                Err(e) => {
                    error!("unable to write chart: {}", e);
                    writeln!(self.output, "Error writing chart: {}", e)?;
                }
            }
        }

        writeln!(self.output, "Thank You for using Election Results System!")?;
        writeln!(self.output, "Have a great day!")?;
        Ok(())
    }
}
