//! Stored document shapes and the typed records returned to callers.

pub mod category;
pub mod person;
pub mod title;
