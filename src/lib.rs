pub mod error;
pub mod league;
pub mod models;

pub use error::LeagueError;
