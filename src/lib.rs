//! Two-player paddle duel: the fixed-rate simulation and layered renderer.
//!
//! Everything in this crate is independent of the board. The firmware in
//! `main.rs` plugs the ILI9341 panel, the button bank, the buzzer and the
//! SysTick timer into the seams defined here.
#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod collision;
pub mod config;
pub mod game;
pub mod geometry;
pub mod input_device;
pub mod layer;
pub mod physics;
pub mod render;
pub mod scheduler;
pub mod score;
