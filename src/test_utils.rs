use crate::db::{build_pool, run_migrations, DieselConnectionManager};
use crate::models::matches::{Match, NewMatch};
use crate::models::participant_matches::{NewParticipantMatch, ParticipantMatch};
use crate::models::participants::{NewParticipant, Participant, ParticipantEntry};
use crate::models::people::NewPerson;
use crate::models::roles::NewRole;
use crate::models::schools::NewSchool;
use crate::models::tournaments::{NewTournament, Tournament};
use crate::store::{BracketStore, MockBracketStore, StoreError};
use crate::utils::{format_secs, uuid_string};
use bb8::Pool;
use diesel::{Connection as _, SqliteConnection};
use std::path::PathBuf;

pub fn setup_db() -> Result<SqliteConnection, anyhow::Error> {
    let mut db = SqliteConnection::establish(":memory:")?;
    run_migrations(&mut db)?;
    Ok(db)
}

/// A migrated database in a file of its own, for tests that need a pool. Every connection to
/// `:memory:` gets a fresh database, so those can't be pooled.
pub struct TempDb {
    pub pool: Pool<DieselConnectionManager>,
    path: PathBuf,
}

impl TempDb {
    pub async fn new() -> Result<Self, anyhow::Error> {
        let name = format!("brackets-test-{}.sqlite3", uuid_string());
        let path = std::env::temp_dir().join(name);
        let path_str = path.to_string_lossy().to_string();
        {
            let mut c = SqliteConnection::establish(&path_str)?;
            run_migrations(&mut c)?;
        }
        let pool = build_pool(DieselConnectionManager::new(path_str), 4).await?;
        Ok(Self { pool, path })
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

pub struct Fixture {
    pub tournament: Tournament,
    /// semi 1, semi 2, final, consolation
    pub matches: Vec<Match>,
    /// seeds 1 through 4
    pub participants: Vec<Participant>,
}

/// A four man bracket with both semis wrestled. Only the 1 seed has been entered into the
/// final so far, and nobody is in the (unplaced) consolation match.
pub fn four_match_fixture(conn: &mut SqliteConnection) -> Result<Fixture, anyhow::Error> {
    let tournament = NewTournament::new("Test Open", Some(2019)).save(conn)?;
    let school = NewSchool::new("Iowa").save(conn)?;
    let names = [
        ("Spencer", "Lee"),
        ("Austin", "DeSanto"),
        ("Pat", "Lugo"),
        ("Max", "Murin"),
    ];
    let mut participants = vec![];
    for (seed, (first, last)) in names.into_iter().enumerate() {
        let person = NewPerson::new(first, last).save(conn)?;
        let role = NewRole::wrestler(&person).save(conn)?;
        let p = NewParticipant::new(
            &role,
            Some(&school),
            Some(2019),
            Some("125"),
            Some(seed as i32 + 1),
        )
        .save(conn)?;
        participants.push(p);
    }

    let semi_1 = NewMatch::new(&tournament, "Semifinals", 1, 1).save(conn)?;
    let semi_2 = NewMatch::new(&tournament, "Semifinals", 1, 2).save(conn)?;
    let the_final = NewMatch::new(&tournament, "Finals", 2, 1).save(conn)?;
    let consolation = NewMatch::unordered(&tournament, "Consolation").save(conn)?;

    NewParticipantMatch::new(&semi_1, &participants[0])
        .won(Some(7), Some("DEC"))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_1, &participants[3])
        .lost(Some(2), Some("DEC"))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_2, &participants[1])
        .won(Some(6), Some("FALL"))
        .fall_time(format_secs(107))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&semi_2, &participants[2])
        .lost(Some(0), Some("FALL"))
        .advancing_to(&the_final)
        .save(conn)?;
    NewParticipantMatch::new(&the_final, &participants[0]).save(conn)?;

    Ok(Fixture {
        tournament,
        matches: vec![semi_1, semi_2, the_final, consolation],
        participants,
    })
}

/// a mock that hands back the same rows for any tournament id
pub fn canned_store(
    tournament: Option<Tournament>,
    matches: Vec<Match>,
    results: Vec<ParticipantMatch>,
    entries: Vec<ParticipantEntry>,
) -> MockBracketStore {
    let mut store = MockBracketStore::new();
    let all = tournament.iter().cloned().collect::<Vec<_>>();
    store
        .expect_tournament()
        .returning(move |_| Ok(tournament.clone()));
    store
        .expect_tournaments()
        .returning(move || Ok(all.clone()));
    store
        .expect_matches()
        .returning(move |_| Ok(matches.clone()));
    store
        .expect_participant_matches()
        .returning(move |_| Ok(results.clone()));
    store
        .expect_participant_entries()
        .returning(move |_| Ok(entries.clone()));
    store
}

/// never answers anything
pub struct SlowStore;

impl SlowStore {
    async fn stall<T>() -> Result<T, StoreError> {
        std::future::pending().await
    }
}

#[async_trait::async_trait]
impl BracketStore for SlowStore {
    async fn tournament(&self, _: &str) -> Result<Option<Tournament>, StoreError> {
        Self::stall().await
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        Self::stall().await
    }

    async fn matches(&self, _: &str) -> Result<Vec<Match>, StoreError> {
        Self::stall().await
    }

    async fn participant_matches(&self, _: &str) -> Result<Vec<ParticipantMatch>, StoreError> {
        Self::stall().await
    }

    async fn participant_entries(&self, _: &str) -> Result<Vec<ParticipantEntry>, StoreError> {
        Self::stall().await
    }
}

#[cfg(test)]
mod tests {
    use super::{four_match_fixture, setup_db};
    use crate::schema::participant_match;
    use diesel::dsl::count_star;
    use diesel::prelude::*;

    #[test]
    fn test_database_init_is_isolated() -> anyhow::Result<()> {
        for _ in 0..2 {
            let mut db = setup_db()?;
            four_match_fixture(&mut db)?;
            let n: i64 = participant_match::table
                .select(count_star())
                .get_result(&mut db)?;
            assert_eq!(5, n);
        }
        Ok(())
    }
}
