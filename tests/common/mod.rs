#![allow(dead_code)]

use bb8::Pool;
use diesel::{Connection, SqliteConnection};
use std::path::PathBuf;
use wrestling_brackets::db::{build_pool, run_migrations, DieselConnectionManager};
use wrestling_brackets::models::matches::{Match, NewMatch};
use wrestling_brackets::models::participant_matches::NewParticipantMatch;
use wrestling_brackets::models::participants::{NewParticipant, Participant};
use wrestling_brackets::models::people::NewPerson;
use wrestling_brackets::models::roles::NewRole;
use wrestling_brackets::models::tournaments::{NewTournament, Tournament};
use wrestling_brackets::utils::uuid_string;

pub fn start_db() -> Result<SqliteConnection, anyhow::Error> {
    let mut db = SqliteConnection::establish(":memory:")?;
    run_migrations(&mut db)?;
    Ok(db)
}

/// a migrated sqlite file that goes away with the struct
pub struct TempDb {
    pub pool: Pool<DieselConnectionManager>,
    path: PathBuf,
}

impl TempDb {
    pub async fn new() -> Result<Self, anyhow::Error> {
        let name = format!("brackets-it-{}.sqlite3", uuid_string());
        let path = std::env::temp_dir().join(name);
        let path_str = path.to_string_lossy().to_string();
        run_migrations(&mut SqliteConnection::establish(&path_str)?)?;
        let pool = build_pool(DieselConnectionManager::new(path_str), 4).await?;
        Ok(Self { pool, path })
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

pub fn wrestler(
    first: &str,
    last: &str,
    seed: Option<i32>,
    conn: &mut SqliteConnection,
) -> Result<Participant, anyhow::Error> {
    let person = NewPerson::new(first, last).save(conn)?;
    let role = NewRole::wrestler(&person).save(conn)?;
    Ok(NewParticipant::new(&role, None, None, Some("141"), seed).save(conn)?)
}

pub struct Bracket {
    pub tournament: Tournament,
    /// semi 1, semi 2, final, third place
    pub matches: Vec<Match>,
}

/// Two semis wrestled and feeding the final, which nobody has been entered into yet. The
/// third place match is in the same round as the final and is also empty.
pub fn two_round_bracket(
    name: &str,
    conn: &mut SqliteConnection,
) -> Result<Bracket, anyhow::Error> {
    let tournament = NewTournament::new(name, Some(2023)).save(conn)?;
    let semi_1 = NewMatch::new(&tournament, "Semifinals", 1, 1).save(conn)?;
    let semi_2 = NewMatch::new(&tournament, "Semifinals", 1, 2).save(conn)?;
    let the_final = NewMatch::new(&tournament, "Finals", 2, 1).save(conn)?;
    let third = NewMatch::new(&tournament, "3rd Place", 2, 2).save(conn)?;

    let yianni = wrestler("Yianni", "Diakomihalis", Some(1), conn)?;
    let real = wrestler("Real", "Woods", Some(4), conn)?;
    let andrew = wrestler("Andrew", "Alirez", Some(2), conn)?;
    let beau = wrestler("Beau", "Bartlett", None, conn)?;

    NewParticipantMatch::new(&semi_1, &yianni)
        .won(Some(7), Some("DEC"))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_1, &real)
        .lost(Some(3), Some("DEC"))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_2, &andrew)
        .lost(Some(0), Some("FALL"))
        .fall_time("02:10")
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_2, &beau)
        .won(None, Some("FALL"))
        .fall_time("02:10")
        .advancing_to(&the_final)
        .save(conn)?;

    Ok(Bracket {
        tournament,
        matches: vec![semi_1, semi_2, the_final, third],
    })
}
