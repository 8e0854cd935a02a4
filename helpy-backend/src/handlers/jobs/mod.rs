pub mod crud;
pub mod matching;
pub mod query;
