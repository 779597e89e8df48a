//! # Playback
//!
//! Playback control and persisted playback state.
//!
//! ## Components
//!
//! - **Player Controller** (`controller`): single-source playback over the
//!   native player bridge; episode and live stream are mutually exclusive
//! - **Resume State** (`resume`): last episode and position, live autostart
//!   flag, restored at launch
//! - **Episode Id Lists** (`lists`): persisted play queue and downloaded
//!   episode ids

pub mod controller;
pub mod error;
pub mod lists;
pub mod resume;

pub use controller::{
    ActiveSource, PlaybackStatus, PlayerController, POSITION_SAVE_DEBOUNCE,
};
pub use error::{PlaybackError, Result};
pub use lists::EpisodeIdList;
pub use resume::{ResumeState, ResumeStore};
