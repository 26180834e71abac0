//! Adventure - Turn-Based Text Adventure Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod combat;
pub mod constants;
pub mod event_log;
pub mod game;
pub mod input;
pub mod save_manager;
pub mod simulator;
pub mod world;
