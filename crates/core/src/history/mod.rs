pub mod entity;
pub mod error;
pub mod merge;
pub mod port;
