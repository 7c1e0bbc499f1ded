use crate::save_fn;
use crate::schema::tournament;
use crate::utils::uuid_string;
use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Serialize;

#[derive(Queryable, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub tournament_id: String,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub location: Option<String>,
}

impl Tournament {
    pub fn get_by_id(
        id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Option<Self>, diesel::result::Error> {
        tournament::table.find(id).first(conn).optional()
    }

    /// every tournament, oldest first
    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Self>, diesel::result::Error> {
        tournament::table
            .order((
                tournament::year.asc(),
                tournament::name.asc(),
                tournament::tournament_id.asc(),
            ))
            .load(conn)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.tournament_id)
    }
}

#[derive(Insertable)]
#[diesel(table_name=tournament)]
pub struct NewTournament {
    tournament_id: String,
    name: Option<String>,
    year: Option<i32>,
    location: Option<String>,
}

impl NewTournament {
    pub fn new<S: Into<String>>(name: S, year: Option<i32>) -> Self {
        Self {
            tournament_id: uuid_string(),
            name: Some(name.into()),
            year,
            location: None,
        }
    }

    save_fn!(tournament::table, Tournament);
}
