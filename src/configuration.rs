use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use error::Error;

// header names in the results file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub first_name: String,
    pub surname: String,
    pub gender: String,
    pub constituency: String,
    pub party: String,
    pub electorate: String,
    // rows lacking any of these are skipped
    pub required: Vec<String>,
}

impl Default for Columns {
    fn default() -> Columns {
        Columns {
            first_name: "Member first name".to_string(),
            surname: "Member surname".to_string(),
            gender: "Member gender".to_string(),
            constituency: "Constituency name".to_string(),
            party: "First party".to_string(),
            electorate: "Electorate".to_string(),
            required: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Output {
    pub summary: PathBuf,
    pub chart: Option<PathBuf>,
    pub top_parties: usize,
}

impl Default for Output {
    fn default() -> Output {
        Output {
            summary: PathBuf::from("ElectionStatistics.txt"),
            chart: Some(PathBuf::from("ElectionChart.svg")),
            top_parties: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: Columns,
    // party name -> header of the column holding that party's votes
    pub vote_columns: HashMap<String, String>,
    pub output: Output,
}

impl Config {
    /// The header holding the vote count for `party`. Parties without an
    /// explicit mapping are looked up by their own name.
    pub fn vote_column<'a>(&'a self, party: &'a str) -> &'a str {
        match self.vote_columns.get(party) {
            Some(column) => column.as_str(),
            None => party,
        }
    }
}

fn config_contents(input_file: &Path) -> Result<Config, Error> {
    let mut fd = File::open(input_file)?;
    let mut buf = String::new();
    fd.read_to_string(&mut buf)?;
    parse_config(&buf)
}

pub fn parse_config(buf: &str) -> Result<Config, Error> {
    let config: Config = toml::from_str(buf)?;
    Ok(config)
}

pub fn read_config(input_file: Option<&Path>) -> Result<Config, Error> {
    match input_file {
        Some(path) => {
            let config = config_contents(path)?;
            info!("read configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
