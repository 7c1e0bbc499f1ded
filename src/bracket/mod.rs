//! Rebuilding single-elimination brackets out of the normalized match tables.

use crate::store::StoreError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub mod projection;
pub mod projector;
pub mod render;
pub mod tree;

pub use projector::BracketProjector;
pub use tree::BracketTree;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    /// fewer than two participants so far
    Pending,
    /// both participants are in, no winner recorded
    InProgress,
    Done,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Scheduled,
    Won,
    Lost,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantNode {
    pub participant_id: String,
    pub display_name: String,
    pub is_winner: bool,
    pub result_text: Option<String>,
    pub status: ParticipantStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fall_time: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchNode {
    pub match_id: String,
    pub round_name: Option<String>,
    pub next_match_id: Option<String>,
    pub state: MatchState,
    pub participants: Vec<ParticipantNode>,
}

/// Data that breaks one of the bracket's cross-row rules. The schema can't enforce any of these,
/// so they get checked on the way out and reported as-is.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Inconsistency {
    #[error("Match {match_id} has more than one winner: {participant_ids:?}")]
    #[serde(rename_all = "camelCase")]
    MultipleWinners {
        match_id: String,
        participant_ids: Vec<String>,
    },
    #[error("Match {match_id} has participants advancing to different matches: {next_match_ids:?}")]
    #[serde(rename_all = "camelCase")]
    ConflictingNextMatch {
        match_id: String,
        next_match_ids: Vec<String>,
    },
    #[error("Match {match_id} has {count} participants")]
    #[serde(rename_all = "camelCase")]
    TooManyParticipants { match_id: String, count: usize },
    #[error("Match {match_id} refers to participant {participant_id}, who can't be found")]
    #[serde(rename_all = "camelCase")]
    UnknownParticipant {
        match_id: String,
        participant_id: String,
    },
    #[error("Match {match_id} advances to {next_match_id}, which is not in this tournament")]
    #[serde(rename_all = "camelCase")]
    NextMatchOutsideTournament {
        match_id: String,
        next_match_id: String,
    },
    #[error("Match {match_id} advances to {next_match_id}, which is not in a later round")]
    #[serde(rename_all = "camelCase")]
    NextMatchNotLater {
        match_id: String,
        next_match_id: String,
    },
    #[error("Matches advance in a cycle: {match_ids:?}")]
    #[serde(rename_all = "camelCase")]
    Cycle { match_ids: Vec<String> },
}

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("No tournament with id {0}")]
    NotFound(String),
    #[error("Inconsistent bracket data: {0}")]
    Inconsistent(#[from] Inconsistency),
    #[error("Timed out after {0:?} waiting on the database")]
    Timeout(Duration),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub tournament_id: String,
    pub match_count: usize,
    pub inconsistencies: Vec<Inconsistency>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }
}
