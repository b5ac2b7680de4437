//! Booth flow: which screen is showing and what has been chosen so far.

mod state;

pub use state::{BoothEvent, BoothStep, PhotoBoothState, enters_capture, leaves_capture};
