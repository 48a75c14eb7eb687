//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies (audio goes through `AudioSource`)

pub mod body;
pub mod cue;
pub mod events;
pub mod highlight;
pub mod mesh;
pub mod pin;
pub mod spinner;
pub mod tick;
pub mod wheel;

pub use body::{ForceMode, WheelBody};
pub use cue::{AudioCue, AudioSource, LogAudio, SoundEffect};
pub use events::{EventBus, SubscriptionId};
pub use highlight::Highlighter;
pub use mesh::{Aabb, SliceMesh, generate_slice};
pub use pin::{slice_angle, slice_at_pin, slice_span};
pub use spinner::Spinner;
pub use tick::{TickInput, tick};
pub use wheel::{Slice, SliceChanged, SpinSettled, SpinStarted, Wheel, WheelPhase};
