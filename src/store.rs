//! Read access to the relational store. Everything the projector knows about a tournament comes
//! through [BracketStore]; nothing here writes.

use crate::db::DieselConnectionManager;
use crate::models::matches::Match;
use crate::models::participant_matches::ParticipantMatch;
use crate::models::participants::ParticipantEntry;
use crate::models::tournaments::Tournament;
use bb8::{Pool, RunError};
use diesel::{ConnectionError, QueryResult, SqliteConnection};
use std::ops::DerefMut;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] RunError<ConnectionError>),
    #[error("Query task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BracketStore: Send + Sync {
    async fn tournament(&self, tournament_id: &str) -> Result<Option<Tournament>, StoreError>;

    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError>;

    /// every match in the tournament; callers must not rely on the order
    async fn matches(&self, tournament_id: &str) -> Result<Vec<Match>, StoreError>;

    /// every participant-match row for every match in the tournament
    async fn participant_matches(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantMatch>, StoreError>;

    /// display data for everyone with a participant-match row in the tournament
    async fn participant_entries(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantEntry>, StoreError>;
}

#[async_trait::async_trait]
impl<T: BracketStore + ?Sized> BracketStore for Box<T> {
    async fn tournament(&self, tournament_id: &str) -> Result<Option<Tournament>, StoreError> {
        (**self).tournament(tournament_id).await
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        (**self).tournaments().await
    }

    async fn matches(&self, tournament_id: &str) -> Result<Vec<Match>, StoreError> {
        (**self).matches(tournament_id).await
    }

    async fn participant_matches(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantMatch>, StoreError> {
        (**self).participant_matches(tournament_id).await
    }

    async fn participant_entries(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantEntry>, StoreError> {
        (**self).participant_entries(tournament_id).await
    }
}

#[derive(Clone)]
pub struct DieselBracketStore {
    pool: Pool<DieselConnectionManager>,
}

impl DieselBracketStore {
    pub fn new(pool: Pool<DieselConnectionManager>) -> Self {
        Self { pool }
    }

    /// Checks out a connection of its own and runs `f` on the blocking pool, so that several
    /// reads can be in flight at once.
    async fn with_cxn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut cxn = self.pool.get_owned().await?;
        let t = tokio::task::spawn_blocking(move || f(cxn.deref_mut())).await??;
        Ok(t)
    }
}

#[async_trait::async_trait]
impl BracketStore for DieselBracketStore {
    async fn tournament(&self, tournament_id: &str) -> Result<Option<Tournament>, StoreError> {
        let id = tournament_id.to_string();
        self.with_cxn(move |c| Tournament::get_by_id(&id, c)).await
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        self.with_cxn(Tournament::all).await
    }

    async fn matches(&self, tournament_id: &str) -> Result<Vec<Match>, StoreError> {
        let id = tournament_id.to_string();
        self.with_cxn(move |c| Match::for_tournament(&id, c)).await
    }

    async fn participant_matches(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantMatch>, StoreError> {
        let id = tournament_id.to_string();
        self.with_cxn(move |c| ParticipantMatch::for_tournament(&id, c))
            .await
    }

    async fn participant_entries(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<ParticipantEntry>, StoreError> {
        let id = tournament_id.to_string();
        self.with_cxn(move |c| ParticipantEntry::for_tournament(&id, c))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{BracketStore, DieselBracketStore};
    use crate::test_utils::{four_match_fixture, TempDb};

    #[tokio::test]
    async fn test_reads_only_the_requested_tournament() -> anyhow::Result<()> {
        let db = TempDb::new().await?;
        let (fx, other) = {
            let mut c = db.pool.get().await?;
            (four_match_fixture(&mut c)?, four_match_fixture(&mut c)?)
        };
        let store = DieselBracketStore::new(db.pool.clone());
        let tid = fx.tournament.tournament_id.as_str();

        assert_eq!(Some(fx.tournament.clone()), store.tournament(tid).await?);
        assert_eq!(None, store.tournament("nope").await?);
        assert_eq!(2, store.tournaments().await?.len());

        let matches = store.matches(tid).await?;
        assert_eq!(4, matches.len());
        assert!(matches.iter().all(|m| m.tournament_id == tid));

        let rows = store.participant_matches(tid).await?;
        // two full first round matches, one half-filled final
        assert_eq!(5, rows.len());
        assert!(rows
            .iter()
            .all(|r| other.matches.iter().all(|m| m.match_id != r.match_id)));

        let entries = store.participant_entries(tid).await?;
        assert_eq!(4, entries.len());
        Ok(())
    }
}
