pub(crate) mod config;
pub(crate) mod ease;
pub(crate) mod schedule;
