//! Database layer: initialization, migrations, models, and queries

mod init;
mod migrations;
pub mod models;
pub mod projects;
pub mod submissions;

pub use init::init_database;
