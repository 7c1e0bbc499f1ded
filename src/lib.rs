pub mod bracket;
pub mod config;
pub mod constants;
pub mod db;
pub mod models;
pub mod schema;
pub mod store;
pub mod utils;
pub mod web;

#[cfg(test)]
mod test_utils;
