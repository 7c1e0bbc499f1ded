pub mod matches;
pub mod participant_matches;
pub mod participants;
pub mod people;
pub mod roles;
pub mod schools;
pub mod tournaments;

/// creates a function named `save()` that takes a &SqliteConnection
#[macro_export]
macro_rules! save_fn {
    ($table:expr, $output:ty) => {
        pub fn save(&self, cxn: &mut diesel::SqliteConnection) -> diesel::QueryResult<$output> {
            use diesel::RunQueryDsl;
            diesel::insert_into($table).values(self).get_result(cxn)
        }
    };
}
