pub mod event;
pub mod matches;
pub mod tournament;
