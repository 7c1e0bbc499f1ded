use crate::bracket::tree::BracketTree;
use crate::bracket::{
    Inconsistency, MatchNode, MatchState, ParticipantNode, ParticipantStatus, ValidationReport,
};
use crate::constants::{LOST, WON};
use crate::models::matches::Match;
use crate::models::participant_matches::ParticipantMatch;
use crate::models::participants::ParticipantEntry;
use crate::models::tournaments::Tournament;
use crate::utils::non_blank;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::Write;

/// Everything read out of the store for one tournament, before any of it is checked.
#[derive(Debug, Clone)]
pub struct TournamentRows {
    pub tournament: Tournament,
    pub matches: Vec<Match>,
    pub results: Vec<ParticipantMatch>,
    pub entries: Vec<ParticipantEntry>,
}

/// `WON 7 (DEC)`, `LOST 0 (FALL)`; the score and result type are each left out if missing
pub fn result_text(is_winner: bool, score: Option<i32>, result_type: Option<&str>) -> String {
    let mut text = String::from(if is_winner { WON } else { LOST });
    if let Some(score) = score {
        // writing to a String can't fail
        let _ = write!(text, " {score}");
    }
    if let Some(rt) = non_blank(result_type) {
        let _ = write!(text, " ({rt})");
    }
    text
}

/// expects `winners <= 1` and `participants <= 2`, see [check_match]
pub fn derive_state(participants: usize, winners: usize) -> MatchState {
    match (participants, winners) {
        (0 | 1, _) => MatchState::Pending,
        (_, 0) => MatchState::InProgress,
        _ => MatchState::Done,
    }
}

fn check_participant_count(
    match_id: &str,
    rows: &[ParticipantMatch],
) -> Result<(), Inconsistency> {
    if rows.len() > 2 {
        return Err(Inconsistency::TooManyParticipants {
            match_id: match_id.to_string(),
            count: rows.len(),
        });
    }
    Ok(())
}

/// the winning row, if the match has been decided
pub fn winner<'a>(
    match_id: &str,
    rows: &'a [ParticipantMatch],
) -> Result<Option<&'a ParticipantMatch>, Inconsistency> {
    let mut winners = rows.iter().filter(|r| r.is_winner()).collect::<Vec<_>>();
    if winners.len() > 1 {
        return Err(Inconsistency::MultipleWinners {
            match_id: match_id.to_string(),
            participant_ids: winners
                .iter()
                .map(|r| r.participant_id.clone())
                .sorted()
                .collect(),
        });
    }
    Ok(winners.pop())
}

/// Where the winner of this match goes. Every row that names a next match has to name the same
/// one; the winner's row is preferred when picking it.
pub fn next_match_id(
    match_id: &str,
    rows: &[ParticipantMatch],
) -> Result<Option<String>, Inconsistency> {
    let named = rows
        .iter()
        .filter_map(|r| r.next_match_id.as_deref())
        .unique()
        .sorted()
        .collect::<Vec<_>>();
    if named.len() > 1 {
        return Err(Inconsistency::ConflictingNextMatch {
            match_id: match_id.to_string(),
            next_match_ids: named.into_iter().map(str::to_string).collect(),
        });
    }
    let from_winner = rows
        .iter()
        .find(|r| r.is_winner())
        .and_then(|r| r.next_match_id.clone());
    Ok(from_winner.or_else(|| named.first().map(|s| s.to_string())))
}

/// all the per-match rules, in the order they're reported
fn check_match(
    m: &Match,
    rows: &[ParticipantMatch],
    entries: &HashMap<&str, &ParticipantEntry>,
) -> Result<(), Inconsistency> {
    check_participant_count(&m.match_id, rows)?;
    winner(&m.match_id, rows)?;
    next_match_id(&m.match_id, rows)?;
    if let Some(r) = rows
        .iter()
        .find(|r| !entries.contains_key(r.participant_id.as_str()))
    {
        return Err(Inconsistency::UnknownParticipant {
            match_id: m.match_id.clone(),
            participant_id: r.participant_id.clone(),
        });
    }
    Ok(())
}

fn group_by_match(results: Vec<ParticipantMatch>) -> HashMap<String, Vec<ParticipantMatch>> {
    results.into_iter().into_group_map_by(|r| r.match_id.clone())
}

fn index_entries(entries: &[ParticipantEntry]) -> HashMap<&str, &ParticipantEntry> {
    entries
        .iter()
        .map(|e| (e.participant_id.as_str(), e))
        .collect()
}

fn participant_node(
    row: &ParticipantMatch,
    entry: &ParticipantEntry,
    decided: bool,
) -> ParticipantNode {
    let (status, result) = if decided {
        let status = if row.is_winner() {
            ParticipantStatus::Won
        } else {
            ParticipantStatus::Lost
        };
        let text = result_text(row.is_winner(), row.score, row.result_type.as_deref());
        (status, Some(text))
    } else {
        (ParticipantStatus::Scheduled, None)
    };
    ParticipantNode {
        participant_id: row.participant_id.clone(),
        display_name: entry.display_name(),
        is_winner: row.is_winner(),
        result_text: result,
        status,
        seed: entry.seed,
        school: entry.school_name.clone(),
        fall_time: non_blank(row.fall_time.as_deref()).map(str::to_string),
    }
}

/// builds one match's node; `rows` are that match's participant-match rows
pub fn project_match(
    m: &Match,
    rows: &[ParticipantMatch],
    entries: &HashMap<&str, &ParticipantEntry>,
) -> Result<MatchNode, Inconsistency> {
    check_match(m, rows, entries)?;
    let winner = winner(&m.match_id, rows)?;
    let next_match_id = next_match_id(&m.match_id, rows)?;
    let state = derive_state(rows.len(), winner.iter().count());

    let mut participants = Vec::with_capacity(rows.len());
    for row in rows {
        let entry = entries.get(row.participant_id.as_str()).ok_or_else(|| {
            Inconsistency::UnknownParticipant {
                match_id: m.match_id.clone(),
                participant_id: row.participant_id.clone(),
            }
        })?;
        participants.push(participant_node(row, entry, winner.is_some()));
    }
    // top seed first; unseeded after everyone seeded
    participants.sort_by_key(|p| (p.seed.is_none(), p.seed, p.participant_id.clone()));

    Ok(MatchNode {
        match_id: m.match_id.clone(),
        round_name: m.round.clone(),
        next_match_id,
        state,
        participants,
    })
}

/// The whole bracket, rounds in order and matches left to right within a round. Stops at the
/// first rule violation.
pub fn project(rows: TournamentRows) -> Result<Vec<MatchNode>, Inconsistency> {
    let TournamentRows {
        tournament: _,
        mut matches,
        results,
        entries,
    } = rows;
    matches.sort_by(Match::bracket_cmp);
    let entries = index_entries(&entries);
    let mut by_match = group_by_match(results);

    matches
        .iter()
        .map(|m| {
            let rows = by_match.remove(&m.match_id).unwrap_or_default();
            project_match(m, &rows, &entries)
        })
        .collect()
}

/// the `next_match_id` of every match that has one
pub fn links(
    matches: &[Match],
    results: &[ParticipantMatch],
) -> Result<HashMap<String, String>, Inconsistency> {
    let by_match = results.iter().cloned().into_group_map_by(|r| r.match_id.clone());
    let mut out = HashMap::new();
    for m in matches {
        let rows = by_match.get(&m.match_id).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(next) = next_match_id(&m.match_id, rows)? {
            out.insert(m.match_id.clone(), next);
        }
    }
    Ok(out)
}

/// Every rule violation in the tournament, not just the first. Matches are visited in bracket
/// order; tree-level problems (links out of the tournament, round order, cycles) come last.
pub fn validate(rows: &TournamentRows) -> ValidationReport {
    let entries = index_entries(&rows.entries);
    let by_match = rows
        .results
        .iter()
        .cloned()
        .into_group_map_by(|r| r.match_id.clone());
    let matches = rows
        .matches
        .iter()
        .sorted_by(|a, b| a.bracket_cmp(b))
        .collect::<Vec<_>>();

    let mut inconsistencies = vec![];
    let mut links = HashMap::new();
    for m in &matches {
        let rows = by_match.get(&m.match_id).map(Vec::as_slice).unwrap_or(&[]);
        if let Err(e) = check_participant_count(&m.match_id, rows) {
            inconsistencies.push(e);
        }
        if let Err(e) = winner(&m.match_id, rows) {
            inconsistencies.push(e);
        }
        match next_match_id(&m.match_id, rows) {
            Ok(Some(next)) => {
                links.insert(m.match_id.clone(), next);
            }
            Ok(None) => {}
            Err(e) => inconsistencies.push(e),
        }
        for r in rows {
            if !entries.contains_key(r.participant_id.as_str()) {
                inconsistencies.push(Inconsistency::UnknownParticipant {
                    match_id: m.match_id.clone(),
                    participant_id: r.participant_id.clone(),
                });
            }
        }
    }

    let (tree, outside) = BracketTree::build(rows.matches.clone(), &links);
    inconsistencies.extend(outside);
    inconsistencies.extend(tree.round_order_violations());
    inconsistencies.extend(
        tree.find_cycles()
            .into_iter()
            .map(|match_ids| Inconsistency::Cycle { match_ids }),
    );

    ValidationReport {
        tournament_id: rows.tournament.tournament_id.clone(),
        match_count: rows.matches.len(),
        inconsistencies,
    }
}
