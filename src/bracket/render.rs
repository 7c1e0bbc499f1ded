//! Plain-text and CSV renderings of a projected bracket, for the command line tools.

use crate::bracket::{MatchNode, MatchState, ValidationReport};
use crate::models::tournaments::Tournament;
use itertools::Itertools;
use std::fmt::Write as _;
use std::io;

const CSV_HEADER: [&str; 9] = [
    "match_id",
    "round",
    "state",
    "next_match_id",
    "participant_id",
    "display_name",
    "seed",
    "school",
    "result",
];

/// the same name the JSON output uses
pub fn state_name(state: MatchState) -> &'static str {
    match state {
        MatchState::Pending => "PENDING",
        MatchState::InProgress => "IN_PROGRESS",
        MatchState::Done => "DONE",
    }
}

/// One block per round, one line per match, one indented line per participant.
pub fn render_text(nodes: &[MatchNode]) -> String {
    let mut out = String::new();
    // writing to a String can't fail
    for (round, matches) in &nodes.iter().group_by(|n| n.round_name.clone()) {
        let _ = writeln!(out, "== {} ==", round.as_deref().unwrap_or("(no round)"));
        for m in matches {
            let next = m
                .next_match_id
                .as_ref()
                .map(|n| format!(" -> {n}"))
                .unwrap_or_default();
            let _ = writeln!(out, "[{}] {}{next}", state_name(m.state), m.match_id);
            for p in &m.participants {
                let seed = p.seed.map(|s| format!(" ({s})")).unwrap_or_default();
                let school = p
                    .school
                    .as_ref()
                    .map(|s| format!(", {s}"))
                    .unwrap_or_default();
                let result = p.result_text.as_deref().unwrap_or("scheduled");
                let fall = p
                    .fall_time
                    .as_ref()
                    .map(|t| format!(" at {t}"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "    {}{seed}{school}: {result}{fall}",
                    p.display_name
                );
            }
        }
    }
    out
}

/// One row per participant. A match nobody has been entered into still gets a row, with the
/// participant columns left blank.
pub fn write_csv<W: io::Write>(nodes: &[MatchNode], w: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(CSV_HEADER)?;
    for m in nodes {
        let base = [
            m.match_id.clone(),
            m.round_name.clone().unwrap_or_default(),
            state_name(m.state).to_string(),
            m.next_match_id.clone().unwrap_or_default(),
        ];
        if m.participants.is_empty() {
            let blanks = std::iter::repeat(String::new()).take(CSV_HEADER.len() - base.len());
            wtr.write_record(base.iter().cloned().chain(blanks))?;
        }
        for p in &m.participants {
            wtr.write_record(base.iter().cloned().chain([
                p.participant_id.clone(),
                p.display_name.clone(),
                p.seed.map(|s| s.to_string()).unwrap_or_default(),
                p.school.clone().unwrap_or_default(),
                p.result_text.clone().unwrap_or_default(),
            ]))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// `ok` or `BAD` plus the match count, then one line per problem
pub fn render_report(name: &str, report: &ValidationReport) -> String {
    if report.is_consistent() {
        return format!("   ok  {name} ({} matches)\n", report.match_count);
    }
    let mut out = format!(
        "   BAD {name} ({} matches, {} problems)\n",
        report.match_count,
        report.inconsistencies.len()
    );
    for i in &report.inconsistencies {
        let _ = writeln!(out, "       - {i}");
    }
    out
}

pub fn inconsistent_count(reports: &[(Tournament, ValidationReport)]) -> usize {
    reports.iter().filter(|(_, r)| !r.is_consistent()).count()
}
