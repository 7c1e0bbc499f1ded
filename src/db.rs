use crate::config::CONFIG;
use bb8::{ManageConnection, Pool};
use diesel::connection::SimpleConnection;
use diesel::{Connection, ConnectionError, ConnectionResult, QueryResult, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

// foreign keys are off by default in sqlite, and the FKs in the schema should mean something
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Error connecting to database: {0}")]
    ConnectionError(#[from] ConnectionError),
    #[error("Error running migrations: {0}")]
    MigrationError(String),
    #[error("Error building connection pool: {0}")]
    PoolError(String),
    #[error("Database file {0} does not exist")]
    MissingDatabase(String),
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), DbError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::MigrationError(e.to_string()))?;
    Ok(())
}

fn establish(path: &str) -> ConnectionResult<SqliteConnection> {
    let mut conn = SqliteConnection::establish(path)?;
    conn.batch_execute(CONNECTION_PRAGMAS)
        .map_err(ConnectionError::CouldntSetupConfiguration)?;
    Ok(conn)
}

/// SQLite happily creates any file it's pointed at, so tools that only read have to check first.
pub fn require_existing_database(path: &str) -> Result<(), DbError> {
    if path == ":memory:" || std::path::Path::new(path).exists() {
        Ok(())
    } else {
        Err(DbError::MissingDatabase(path.to_string()))
    }
}

/// a single connection, outside of any pool. handy for scripts.
pub fn raw_diesel_cxn_from_env() -> ConnectionResult<SqliteConnection> {
    establish(&CONFIG.database_url)
}

/// how many rows each table has, in the order the tables depend on each other
pub fn record_counts(conn: &mut SqliteConnection) -> QueryResult<Vec<(&'static str, i64)>> {
    use crate::schema::{matches, participant, participant_match, person, role, school, tournament};
    use diesel::{QueryDsl, RunQueryDsl};
    Ok(vec![
        ("person", person::table.count().get_result(conn)?),
        ("role", role::table.count().get_result(conn)?),
        ("school", school::table.count().get_result(conn)?),
        ("tournament", tournament::table.count().get_result(conn)?),
        ("participant", participant::table.count().get_result(conn)?),
        ("match", matches::table.count().get_result(conn)?),
        (
            "participant_match",
            participant_match::table.count().get_result(conn)?,
        ),
    ])
}

pub struct DieselConnectionManager {
    path: String,
}

impl DieselConnectionManager {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }

    pub fn new_from_env() -> Self {
        Self::new(CONFIG.database_url.clone())
    }
}

#[async_trait::async_trait]
impl ManageConnection for DieselConnectionManager {
    type Connection = SqliteConnection;
    type Error = ConnectionError;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        establish(&self.path)
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        conn.batch_execute("SELECT 1")
            .map_err(ConnectionError::CouldntSetupConfiguration)
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

pub async fn build_pool(
    manager: DieselConnectionManager,
    max_size: u32,
) -> Result<Pool<DieselConnectionManager>, DbError> {
    let path = manager.path.clone();
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .await
        .map_err(|e| DbError::PoolError(e.to_string()))?;
    info!("Opened connection pool to {path} (max {max_size} connections)");
    Ok(pool)
}
