//
// Pie chart of party vote shares: the largest parties get their own
// (exploded, labelled) slice, everything else is merged into "Other".
// Written as SVG, or as JSON when the output path ends in .json.
//

use std::f64::consts::PI;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use defs::{NameIndex, Party};
use error::Error;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use serde_json;

pub const OTHER_LABEL: &str = "Other";

const EXPLODE: f64 = 0.1;
const START_ANGLE: f64 = 90.0;
const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 700.0;
const RADIUS: f64 = 250.0;
const CENTRE_X: f64 = 350.0;
const CENTRE_Y: f64 = 370.0;

// matplotlib's tab20
const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub votes: u64,
    pub percent: f64,
    pub explode: f64,
    // percentage and vote count shown on the slice
    pub show_value: bool,
}

impl Slice {
    pub fn value_label(&self) -> Option<String> {
        if self.show_value {
            Some(format!(
                "{:.1}% ({} votes)",
                self.percent,
                self.votes.to_formatted_string(&Locale::en)
            ))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub title: String,
    pub total_votes: u64,
    pub slices: Vec<Slice>,
}

impl PieChart {
    /// The `top` parties by vote total, largest first (ties keep their
    /// first-seen order), then one "Other" slice holding the rest if they
    /// polled any votes at all.
    pub fn from_parties(parties: &NameIndex<Party>, top: usize) -> PieChart {
        let total_votes = parties
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.total_votes));
        let percent = |votes: u64| {
            if total_votes == 0 {
                0.0
            } else {
                votes as f64 / total_votes as f64 * 100.0
            }
        };

        // stable, so ties keep first-seen order
        let mut ranked: Vec<&Party> = parties.iter().collect();
        ranked.sort_by(|a, b| b.total_votes.cmp(&a.total_votes));

        let mut slices: Vec<Slice> = ranked
            .iter()
            .take(top)
            .map(|p| Slice {
                label: p.name.clone(),
                votes: p.total_votes,
                percent: percent(p.total_votes),
                explode: EXPLODE,
                show_value: true,
            })
            .collect();

        let other_votes = ranked
            .iter()
            .skip(top)
            .fold(0u64, |total, p| total.saturating_add(p.total_votes));
        if other_votes > 0 {
            slices.push(Slice {
                label: OTHER_LABEL.to_string(),
                votes: other_votes,
                percent: percent(other_votes),
                explode: 0.0,
                show_value: false,
            });
        }

        PieChart {
            title: format!(
                "Election Results: Vote Distribution by Party (Top {} and Other)",
                top
            ),
            total_votes,
            slices,
        }
    }

    /// Slice labels in drawing order, comma separated.
    pub fn legend(&self) -> String {
        self.slices.iter().map(|s| s.label.as_str()).join(", ")
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // writing to a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = WIDTH,
            h = HEIGHT
        );
        let _ = writeln!(svg, "<title>{}</title>", escape(&self.title));
        let _ = writeln!(svg, "<desc>Parties: {}</desc>", escape(&self.legend()));
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="40" text-anchor="middle" font-size="20">{}</text>"#,
            WIDTH / 2.0,
            escape(&self.title)
        );

        let mut angle = START_ANGLE;
        for (idx, slice) in self.slices.iter().enumerate() {
            if self.total_votes == 0 || slice.votes == 0 {
                continue;
            }
            let sweep = slice.votes as f64 / self.total_votes as f64 * 360.0;
            let mid = angle + sweep / 2.0;
            let (cx, cy) = point(CENTRE_X, CENTRE_Y, RADIUS * slice.explode, mid);
            let colour = PALETTE[idx % PALETTE.len()];

            if sweep >= 360.0 {
                let _ = writeln!(
                    svg,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="green" stroke-width="1"/>"#,
                    cx, cy, RADIUS, colour
                );
            } else {
                let (x1, y1) = point(cx, cy, RADIUS, angle);
                let (x2, y2) = point(cx, cy, RADIUS, angle + sweep);
                let large_arc = if sweep > 180.0 { 1 } else { 0 };
                // angles run anticlockwise; with y pointing down that is sweep-flag 0
                let _ = writeln!(
                    svg,
                    r#"<path d="M {:.2} {:.2} L {:.2} {:.2} A {r} {r} 0 {} 0 {:.2} {:.2} Z" fill="{}" stroke="green" stroke-width="1"/>"#,
                    cx, cy, x1, y1, large_arc, x2, y2, colour,
                    r = RADIUS
                );
            }

            let (lx, ly) = point(cx, cy, RADIUS * 1.1, mid);
            let anchor = if lx < cx { "end" } else { "start" };
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="12">{}</text>"#,
                lx, ly, anchor, escape(&slice.label)
            );
            if let Some(value) = slice.value_label() {
                let (vx, vy) = point(cx, cy, RADIUS * 0.6, mid);
                let _ = writeln!(
                    svg,
                    r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="8" font-weight="bold">{}</text>"#,
                    vx, vy, escape(&value)
                );
            }
            angle += sweep;
        }

        let legend_x = CENTRE_X + RADIUS + 120.0;
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="14" font-weight="bold">Parties</text>"#,
            legend_x,
            CENTRE_Y - 120.0
        );
        for (idx, slice) in self.slices.iter().enumerate() {
            let y = CENTRE_Y - 100.0 + 22.0 * idx as f64;
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="14" height="14" fill="{}"/><text x="{}" y="{}" font-size="12">{}</text>"#,
                legend_x,
                y,
                PALETTE[idx % PALETTE.len()],
                legend_x + 20.0,
                y + 12.0,
                escape(&slice.label)
            );
        }
        let _ = writeln!(svg, "</svg>");
        svg
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let fd = File::create(path)?;
        let json = path.extension().map(|ext| ext == "json").unwrap_or(false);
        if json {
            serde_json::to_writer_pretty(fd, self)?;
        } else {
            let mut fd = fd;
            fd.write_all(self.to_svg().as_bytes())?;
        }
        info!("wrote chart ({}) to {}", self.legend(), path.display());
        Ok(())
    }
}

// `angle` in degrees, anticlockwise from the positive x axis
fn point(cx: f64, cy: f64, distance: f64, angle: f64) -> (f64, f64) {
    let rad = angle * PI / 180.0;
    (cx + distance * rad.cos(), cy - distance * rad.sin())
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties(totals: &[(&str, u64)]) -> NameIndex<Party> {
        let mut idx = NameIndex::new();
        for &(name, votes) in totals {
            idx.entry_or_insert_with(name, || Party::new(name)).total_votes = votes;
        }
        idx
    }

    #[test]
    fn seven_parties_make_five_slices_and_other() {
        let p = parties(&[
            ("A", 10),
            ("B", 70),
            ("C", 30),
            ("D", 60),
            ("E", 20),
            ("F", 50),
            ("G", 40),
        ]);
        let chart = PieChart::from_parties(&p, 5);
        assert_eq!(chart.slices.len(), 6);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "D", "F", "G", "C", "Other"]);
        let other = &chart.slices[5];
        assert_eq!(other.votes, 30);
        assert!(!other.show_value);
        assert_eq!(other.explode, 0.0);
        assert!(other.value_label().is_none());
        assert!(chart.slices[..5].iter().all(|s| s.show_value && s.explode > 0.0));
        assert_eq!(chart.total_votes, 280);
        assert_eq!(chart.legend(), "B, D, F, G, C, Other");
    }

    #[test]
    fn no_other_slice_when_few_parties() {
        let chart = PieChart::from_parties(&parties(&[("A", 3), ("B", 1)]), 5);
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.slices[0].value_label().unwrap(), "75.0% (3 votes)");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let chart = PieChart::from_parties(&parties(&[("X", 5), ("Y", 5), ("Z", 9)]), 5);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn zero_votes_render_without_slices() {
        let chart = PieChart::from_parties(&parties(&[("A", 0)]), 5);
        assert_eq!(chart.slices[0].percent, 0.0);
        let svg = chart.to_svg();
        assert!(!svg.contains("<path"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_escapes_labels() {
        let chart = PieChart::from_parties(&parties(&[("Lab & Co-op", 5), ("Con", 5)]), 5);
        let svg = chart.to_svg();
        assert!(svg.contains("Lab &amp; Co-op"));
        assert!(svg.contains("<desc>Parties: Lab &amp; Co-op, Con</desc>"));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        let chart = PieChart::from_parties(
            &parties(&[("A", u64::max_value()), ("B", 1), ("C", 1)]),
            1,
        );
        assert_eq!(chart.total_votes, u64::max_value());
        assert_eq!(chart.slices[1].votes, 2);
    }

    #[test]
    fn single_party_is_a_full_circle() {
        let svg = PieChart::from_parties(&parties(&[("Only", 12_345)]), 5).to_svg();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("100.0% (12,345 votes)"));
    }
}
