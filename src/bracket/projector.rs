use crate::bracket::projection::{self, TournamentRows};
use crate::bracket::tree::BracketTree;
use crate::bracket::{MatchNode, ProjectionError, ValidationReport};
use crate::models::tournaments::Tournament;
use crate::store::{BracketStore, StoreError};
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

/// Turns a tournament's rows into something a bracket view can draw. Holds no state between calls
/// besides the store handle, so one of these can be shared by any number of requests.
pub struct BracketProjector<S> {
    store: S,
    timeout: Duration,
}

impl<S: BracketStore> BracketProjector<S> {
    /// `timeout` bounds the whole read of a tournament, not each query
    pub fn new(store: S, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    async fn bounded<T, F>(&self, what: &str, f: F) -> Result<T, ProjectionError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, f).await {
            Ok(r) => Ok(r?),
            Err(_elapsed) => {
                warn!("Gave up reading {what} after {:?}", self.timeout);
                Err(ProjectionError::Timeout(self.timeout))
            }
        }
    }

    /// all four reads go out at once
    async fn fetch(&self, tournament_id: &str) -> Result<TournamentRows, ProjectionError> {
        let reads = async {
            tokio::try_join!(
                self.store.tournament(tournament_id),
                self.store.matches(tournament_id),
                self.store.participant_matches(tournament_id),
                self.store.participant_entries(tournament_id),
            )
        };
        let (tournament, matches, results, entries) = self
            .bounded(&format!("tournament {tournament_id}"), reads)
            .await?;
        let tournament =
            tournament.ok_or_else(|| ProjectionError::NotFound(tournament_id.to_string()))?;
        debug!(
            "Read {} matches, {} participant-match rows, {} participants for {}",
            matches.len(),
            results.len(),
            entries.len(),
            tournament.display_name()
        );
        Ok(TournamentRows {
            tournament,
            matches,
            results,
            entries,
        })
    }

    /// The tournament's bracket, one node per match, ordered by round and then by position within
    /// the round.
    pub async fn project_bracket(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<MatchNode>, ProjectionError> {
        let rows = self.fetch(tournament_id).await?;
        projection::project(rows).map_err(|e| {
            warn!("Can't project tournament {tournament_id}: {e}");
            ProjectionError::from(e)
        })
    }

    pub async fn bracket_tree(&self, tournament_id: &str) -> Result<BracketTree, ProjectionError> {
        let rows = self.fetch(tournament_id).await?;
        let links = projection::links(&rows.matches, &rows.results)?;
        Ok(BracketTree::new(rows.matches, &links)?)
    }

    /// Every problem with the tournament's data. Only a missing tournament or a failed read is an
    /// error here; bad data ends up in the report.
    pub async fn validate_bracket(
        &self,
        tournament_id: &str,
    ) -> Result<ValidationReport, ProjectionError> {
        let rows = self.fetch(tournament_id).await?;
        let report = projection::validate(&rows);
        if !report.is_consistent() {
            warn!(
                "Tournament {tournament_id} has {} inconsistencies",
                report.inconsistencies.len()
            );
        }
        Ok(report)
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>, ProjectionError> {
        self.bounded("tournament list", self.store.tournaments()).await
    }

    /// a report for every tournament, in listing order
    pub async fn validate_all(
        &self,
    ) -> Result<Vec<(Tournament, ValidationReport)>, ProjectionError> {
        let mut reports = vec![];
        for t in self.tournaments().await? {
            let report = self.validate_bracket(&t.tournament_id).await?;
            reports.push((t, report));
        }
        Ok(reports)
    }
}
