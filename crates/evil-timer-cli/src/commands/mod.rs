pub mod config;
pub mod format;
pub mod modes;
pub mod run;
pub mod simulate;
