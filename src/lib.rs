//! prepdeck - PREP speech slideshow
//!
//! Write the four PREP sections (Point, Reason, Example, Summary), give each
//! a duration, and present them as a timed slideshow in the terminal.

pub mod cli;
pub mod cloud;
pub mod config;
pub mod deck;
pub mod files;
pub mod logging;
pub mod player;
pub mod schedule;
pub mod storage;
pub mod theme;

pub use config::Config;
pub use deck::PrepRecord;
