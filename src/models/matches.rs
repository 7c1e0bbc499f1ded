use crate::models::tournaments::Tournament;
use crate::save_fn;
use crate::schema::matches;
use crate::utils::uuid_string;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::cmp::Ordering;

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub match_id: String,
    pub round: Option<String>,
    pub round_order: Option<i32>,
    pub bracket_order: Option<i32>,
    pub tournament_id: String,
}

/// ascending, with missing values after all the present ones
fn cmp_order(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Match {
    /// all the matches in the tournament, in bracket order (see [Match::bracket_cmp])
    pub fn for_tournament(
        tournament_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        let mut ms: Vec<Self> = matches::table
            .filter(matches::tournament_id.eq(tournament_id))
            .order((
                matches::round_order.asc(),
                matches::bracket_order.asc(),
                matches::match_id.asc(),
            ))
            .load(conn)?;
        // sqlite sorts NULLs first, we want them last
        ms.sort_by(Self::bracket_cmp);
        Ok(ms)
    }

    /// Rounds top to bottom, then left to right within a round. Matches with no round or bracket
    /// order sort after the ones that have one; match id breaks any remaining ties so the order
    /// is total.
    pub fn bracket_cmp(&self, other: &Self) -> Ordering {
        cmp_order(self.round_order, other.round_order)
            .then_with(|| cmp_order(self.bracket_order, other.bracket_order))
            .then_with(|| self.match_id.cmp(&other.match_id))
    }
}

#[derive(Insertable)]
#[diesel(table_name=matches)]
pub struct NewMatch {
    match_id: String,
    round: Option<String>,
    round_order: Option<i32>,
    bracket_order: Option<i32>,
    tournament_id: String,
}

impl NewMatch {
    pub fn new<S: Into<String>>(
        tournament: &Tournament,
        round: S,
        round_order: i32,
        bracket_order: i32,
    ) -> Self {
        Self {
            match_id: uuid_string(),
            round: Some(round.into()),
            round_order: Some(round_order),
            bracket_order: Some(bracket_order),
            tournament_id: tournament.tournament_id.clone(),
        }
    }

    /// a match the loader couldn't place: no round or bracket order
    pub fn unordered<S: Into<String>>(tournament: &Tournament, round: S) -> Self {
        Self {
            match_id: uuid_string(),
            round: Some(round.into()),
            round_order: None,
            bracket_order: None,
            tournament_id: tournament.tournament_id.clone(),
        }
    }

    save_fn!(matches::table, Match);
}
