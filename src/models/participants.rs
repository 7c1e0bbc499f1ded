use crate::models::roles::Role;
use crate::models::schools::School;
use crate::save_fn;
use crate::schema::{matches, participant, participant_match, person, role, school};
use crate::utils::{non_blank, uuid_string};
use diesel::prelude::*;
use diesel::SqliteConnection;

#[derive(Queryable, Debug, Clone)]
pub struct Participant {
    pub participant_id: String,
    pub role_id: String,
    pub school_id: Option<String>,
    pub year: Option<i32>,
    pub weight_class: Option<String>,
    pub seed: Option<i32>,
}

/// A participant with everything needed to show them on a bracket: the person behind their role,
/// and their school if they have one.
#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub participant_id: String,
    pub seed: Option<i32>,
    pub weight_class: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub school_name: Option<String>,
}

impl ParticipantEntry {
    /// every participant that shows up in any match of the given tournament
    pub fn for_tournament(
        tournament_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        let entered = participant_match::table
            .inner_join(matches::table)
            .filter(matches::tournament_id.eq(tournament_id))
            .select(participant_match::participant_id);
        participant::table
            .inner_join(role::table.inner_join(person::table))
            .left_join(school::table)
            .filter(participant::participant_id.eq_any(entered))
            .select((
                participant::participant_id,
                participant::seed,
                participant::weight_class,
                person::first_name,
                person::last_name,
                school::name.nullable(),
            ))
            .order(participant::participant_id.asc())
            .load(conn)
    }

    /// "First Last", skipping whichever half is missing. Falls back to the participant id so
    /// there's always *something* to render.
    pub fn display_name(&self) -> String {
        let parts = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>();
        if parts.is_empty() {
            self.participant_id.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=participant)]
pub struct NewParticipant {
    participant_id: String,
    role_id: String,
    school_id: Option<String>,
    year: Option<i32>,
    weight_class: Option<String>,
    seed: Option<i32>,
}

impl NewParticipant {
    pub fn new(
        role: &Role,
        school: Option<&School>,
        year: Option<i32>,
        weight_class: Option<&str>,
        seed: Option<i32>,
    ) -> Self {
        Self {
            participant_id: uuid_string(),
            role_id: role.role_id.clone(),
            school_id: school.map(|s| s.school_id.clone()),
            year,
            weight_class: weight_class.map(str::to_string),
            seed,
        }
    }

    save_fn!(participant::table, Participant);
}
