extern crate electionstats;
extern crate flate2;
extern crate tempfile;

use std::fs::{self, File};
use std::io::Write;

use electionstats::aggregate::ingest;
use electionstats::chart::PieChart;
use electionstats::configuration::Config;
use electionstats::output::save_statistics;
use electionstats::query::ElectionQueries;
use flate2::write::GzEncoder;
use flate2::Compression;

const RESULTS: &str = "\
Member first name,Member surname,Member gender,Constituency name,First party,Electorate,Lab,Con
Ann,Ash,Female,Wigan,Lab,75000,31000,12000
Bob,Birch,MALE,Bury North,Con,68000,20000,22000
Cath,Cole,female,Wigan,Con,99999,31000,12000
";

#[test]
fn export_matches_aggregates_in_first_seen_order() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    fs::write(&csv_path, RESULTS).unwrap();

    let (data, report) = ingest(&csv_path, &Config::default());
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_skipped, 0);
    assert!(report.source_error.is_none());

    let summary_path = dir.path().join("ElectionStatistics.txt");
    save_statistics(&data, &summary_path).unwrap();
    let summary = fs::read_to_string(&summary_path).unwrap();

    assert_eq!(
        summary,
        "Election Results Summary\n\
         ========================================\n\
         Party Statistics:\n\
         Lab: 31000 votes\n\
         Con: 34000 votes\n\
         \n\
         Constituency Statistics:\n\
         Wigan: 75000 registered voters, 43000 votes cast\n\
         Bury North: 68000 registered voters, 22000 votes cast\n\
         \n"
    );

    let q = ElectionQueries::new(&data);
    assert_eq!(q.party_total_votes("Con"), Some(34000));
    assert_eq!(format!("{:.2}", q.party_percentage("Lab").unwrap()), "47.69");
    let found = q.find_candidates("birch").unwrap();
    assert_eq!(found[0].gender.to_string(), "Male");
}

#[test]
fn gzipped_input_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv.gz");
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(RESULTS.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let (data, report) = ingest(&path, &Config::default());
    assert_eq!(report.rows_accepted(), 3);
    assert_eq!(data.parties.names(), vec!["Lab", "Con"]);
}

#[test]
fn missing_input_leaves_everything_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (data, report) = ingest(&dir.path().join("absent.csv"), &Config::default());
    assert!(report.source_error.is_some());
    let q = ElectionQueries::new(&data);
    assert!(q.party_percentage("Lab").is_none());
    assert!(q.constituency_summary("Wigan").is_none());

    let summary_path = dir.path().join("summary.txt");
    save_statistics(&data, &summary_path).unwrap();
    let summary = fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("Party Statistics:\n\nConstituency Statistics:\n"));
}

#[test]
fn chart_is_written_as_svg_or_json() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    fs::write(&csv_path, RESULTS).unwrap();
    let (data, _) = ingest(&csv_path, &Config::default());
    let chart = PieChart::from_parties(&data.parties, 5);

    let svg_path = dir.path().join("chart.svg");
    chart.write(&svg_path).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Con"));

    let json_path = dir.path().join("chart.json");
    chart.write(&json_path).unwrap();
    let json = fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"slices\""));
    assert!(json.contains("\"label\": \"Lab\""));
}
