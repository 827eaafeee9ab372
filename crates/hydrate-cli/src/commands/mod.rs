pub mod config;
pub mod goal;
pub mod log;
pub mod motion;
