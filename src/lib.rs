#![cfg_attr(not(test), no_std)]

//! Line-following firmware for the ArtyBot.

pub mod config;
pub mod control_loop;
pub mod controls;
pub mod logging;
pub mod selftest;
pub mod startup;
pub mod time;

pub use artybot_hardware as hardware;
