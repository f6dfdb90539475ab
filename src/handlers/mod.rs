pub(crate) mod health;
pub(crate) mod matches;
pub(crate) mod tournaments;
