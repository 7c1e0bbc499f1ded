use crate::models::matches::Match;
use crate::models::participants::Participant;
use crate::save_fn;
use crate::schema::{matches, participant_match};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::SqliteConnection;
use std::fmt::{Display, Formatter};

/// One participant's side of one match. `next_match_id` is where the winner of the match goes.
#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct ParticipantMatch {
    pub match_id: String,
    pub participant_id: String,
    pub is_winner: Option<bool>,
    pub score: Option<i32>,
    pub result_type: Option<String>,
    pub fall_time: Option<String>,
    pub next_match_id: Option<String>,
}

impl ParticipantMatch {
    pub fn for_tournament(
        tournament_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        participant_match::table
            .inner_join(matches::table)
            .filter(matches::tournament_id.eq(tournament_id))
            .select(participant_match::all_columns)
            .order((
                participant_match::match_id.asc(),
                participant_match::participant_id.asc(),
            ))
            .load(conn)
    }

    pub fn is_winner(&self) -> bool {
        self.is_winner.unwrap_or(false)
    }
}

/// A decided match read back in plain words, for spot-checking a freshly loaded database.
#[derive(QueryableByName, Debug, Clone, PartialEq, Eq)]
pub struct DecidedMatch {
    #[diesel(sql_type = Text)]
    pub winner_name: String,
    #[diesel(sql_type = Text)]
    pub loser_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub round: Option<String>,
}

const DECIDED_MATCHES: &str = r#"
SELECT
    trim(coalesce(p1.first_name, '') || ' ' || coalesce(p1.last_name, '')) AS winner_name,
    trim(coalesce(p2.first_name, '') || ' ' || coalesce(p2.last_name, '')) AS loser_name,
    m.round AS round
FROM participant_match pm1
JOIN participant_match pm2
    ON pm1.match_id = pm2.match_id AND pm1.participant_id != pm2.participant_id
JOIN participant part1 ON pm1.participant_id = part1.participant_id
JOIN participant part2 ON pm2.participant_id = part2.participant_id
JOIN role r1 ON part1.role_id = r1.role_id
JOIN role r2 ON part2.role_id = r2.role_id
JOIN person p1 ON r1.person_id = p1.person_id
JOIN person p2 ON r2.person_id = p2.person_id
JOIN "match" m ON pm1.match_id = m.match_id
WHERE pm1.is_winner = 1 AND pm2.is_winner = 0
ORDER BY m.round_order, m.bracket_order, m.match_id
LIMIT ?
"#;

impl DecidedMatch {
    pub fn sample(limit: i64, conn: &mut SqliteConnection) -> QueryResult<Vec<Self>> {
        diesel::sql_query(DECIDED_MATCHES)
            .bind::<BigInt, _>(limit)
            .load(conn)
    }
}

impl Display for DecidedMatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} beat {} in {}",
            self.winner_name,
            self.loser_name,
            self.round.as_deref().unwrap_or("an unnamed round")
        )
    }
}

#[derive(Insertable, Clone)]
#[diesel(table_name=participant_match)]
pub struct NewParticipantMatch {
    match_id: String,
    participant_id: String,
    is_winner: Option<bool>,
    score: Option<i32>,
    result_type: Option<String>,
    fall_time: Option<String>,
    next_match_id: Option<String>,
}

impl NewParticipantMatch {
    /// puts the participant in the match with no result yet
    pub fn new(m: &Match, participant: &Participant) -> Self {
        Self {
            match_id: m.match_id.clone(),
            participant_id: participant.participant_id.clone(),
            is_winner: None,
            score: None,
            result_type: None,
            fall_time: None,
            next_match_id: None,
        }
    }

    pub fn won(self, score: Option<i32>, result_type: Option<&str>) -> Self {
        self.result(true, score, result_type)
    }

    pub fn lost(self, score: Option<i32>, result_type: Option<&str>) -> Self {
        self.result(false, score, result_type)
    }

    fn result(mut self, is_winner: bool, score: Option<i32>, result_type: Option<&str>) -> Self {
        self.is_winner = Some(is_winner);
        self.score = score;
        self.result_type = result_type.map(str::to_string);
        self
    }

    pub fn fall_time<S: Into<String>>(mut self, fall_time: S) -> Self {
        self.fall_time = Some(fall_time.into());
        self
    }

    pub fn advancing_to(mut self, next: &Match) -> Self {
        self.next_match_id = Some(next.match_id.clone());
        self
    }

    save_fn!(participant_match::table, ParticipantMatch);
}
