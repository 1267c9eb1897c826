pub mod matcher;
pub mod title;
