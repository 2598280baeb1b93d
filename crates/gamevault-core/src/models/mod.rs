pub mod game;
pub mod query;
pub mod state;
