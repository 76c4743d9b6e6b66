pub mod entity;
pub mod port;
pub mod rule;
