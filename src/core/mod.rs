pub mod config;
pub mod coordinator;
pub mod dismisser;
pub mod model;
pub mod page;
pub mod timers;
