pub mod bracket;
pub mod engine;
pub mod matchups;
pub mod playoffs;
pub mod schedule;
pub mod scoring;
pub mod season;
pub mod standings;
pub mod timing;
pub mod validation;
