//! Wheel controller
//!
//! Builds the slices, tracks which one sits under the pin, and drives the
//! highlight, sound and event notifications when that changes.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::body::WheelBody;
use super::cue::{AudioCue, AudioSource, SoundEffect};
use super::events::EventBus;
use super::highlight::Highlighter;
use super::mesh::{SliceMesh, generate_slice};
use super::pin::{slice_angle, slice_at_pin, slice_span};
use super::spinner::Spinner;
use crate::config::WheelConfig;
use crate::error::Result;

/// Current phase of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelPhase {
    /// Never spun
    Idle,
    /// Turning after a spin
    Spinning,
    /// Came to rest after a spin
    Settled,
}

/// A spin impulse was applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStarted {
    pub torque: f32,
}

/// A different slice moved under the pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceChanged {
    pub previous: Option<usize>,
    pub current: usize,
}

/// The wheel stopped; `slice` is the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinSettled {
    pub slice: usize,
}

/// One wedge of the wheel
#[derive(Debug, Clone)]
pub struct Slice {
    pub index: usize,
    pub name: String,
    pub mesh: SliceMesh,
    pub highlighter: Highlighter,
    pub cue: AudioCue,
}

/// The prize wheel
pub struct Wheel {
    config: WheelConfig,
    slice_angle: f32,
    slices: Vec<Slice>,
    current_highlighted: Option<usize>,
    pub(crate) body: WheelBody,
    spinner: Spinner,
    pub(crate) phase: WheelPhase,
    pub(crate) bus: Rc<EventBus>,
    spin_cue: AudioCue,
    pub(crate) winner_cue: AudioCue,
}

impl Wheel {
    /// Build a wheel from a config
    ///
    /// `seed` drives spin jitter; `audio` is shared by every slice cue.
    pub fn new(
        config: WheelConfig,
        seed: u64,
        audio: Option<Rc<dyn AudioSource>>,
        bus: Rc<EventBus>,
    ) -> Result<Self> {
        config.validate()?;

        let n = config.number_of_slices;
        let mut slices = Vec::with_capacity(n);
        for i in 0..n {
            let (start, end) = slice_span(i, n);
            let mesh = generate_slice(start, end, config.radius, config.segments)?;

            let color = if i % 2 == 0 {
                config.slice_color_a
            } else {
                config.slice_color_b
            };

            slices.push(Slice {
                index: i,
                name: format!("Slice {}", i),
                mesh,
                highlighter: Highlighter::new(color, config.highlight_color),
                cue: AudioCue::new(Some(SoundEffect::PinTick), audio.clone()),
            });
        }

        let body = WheelBody::new(
            config.inertia,
            config.angular_damping,
            config.max_angular_velocity,
            config.sleep_threshold,
        );
        let spinner = Spinner::new(config.spin_force, config.spin_jitter, seed);
        let spin_cue = AudioCue::new(Some(SoundEffect::SpinStart), audio.clone());
        let winner_cue = AudioCue::new(Some(SoundEffect::Winner), audio);
        let slice_angle = slice_angle(n);

        log::info!(
            "Wheel built: {} slices, radius {}, {} segments each",
            n,
            config.radius,
            config.segments
        );

        Ok(Self {
            config,
            slice_angle,
            slices,
            current_highlighted: None,
            body,
            spinner,
            phase: WheelPhase::Idle,
            bus,
            spin_cue,
            winner_cue,
        })
    }

    /// Poll the pin and react if a new slice is under it
    pub fn update(&mut self) {
        let index = self.winning_slice();
        if Some(index) == self.current_highlighted {
            return;
        }

        let previous = self.current_highlighted;
        if let Some(old) = previous {
            self.slices[old].highlighter.unhighlight();
        }

        let slice = &mut self.slices[index];
        slice.highlighter.highlight();
        slice.cue.play();
        self.current_highlighted = Some(index);

        log::debug!("{} under pin", slice.name);
        self.bus.publish(
            SliceChanged {
                previous,
                current: index,
            },
            false,
        );
    }

    /// Index of the slice currently under the pin
    pub fn winning_slice(&self) -> usize {
        // Construction guarantees at least one slice and a normalized rotation
        slice_at_pin(self.body.euler_z(), self.slices.len()).unwrap_or(0)
    }

    /// Push the wheel. Spinning while already turning adds to the spin.
    pub fn spin(&mut self) -> f32 {
        let torque = self.spinner.spin(&mut self.body);
        self.phase = WheelPhase::Spinning;
        self.spin_cue.play();
        log::info!("Spin started (torque {:.2})", torque);
        self.bus.publish(SpinStarted { torque }, false);
        torque
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn slice_angle(&self) -> f32 {
        self.slice_angle
    }

    /// Wheel rotation (degrees, [0, 360))
    pub fn rotation(&self) -> f32 {
        self.body.euler_z()
    }

    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    /// Slice currently highlighted (None before the first update)
    pub fn highlighted(&self) -> Option<usize> {
        self.current_highlighted
    }

    pub fn body(&self) -> &WheelBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut WheelBody {
        &mut self.body
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;
    use crate::sim::cue::test_support::RecordingAudio;
    use std::cell::RefCell;

    fn build(config: WheelConfig) -> (Wheel, Rc<RecordingAudio>, Rc<EventBus>) {
        let audio = Rc::new(RecordingAudio::default());
        let bus = Rc::new(EventBus::new());
        let wheel = Wheel::new(config, 12345, Some(audio.clone()), bus.clone()).unwrap();
        (wheel, audio, bus)
    }

    #[test]
    fn test_builds_slices() {
        let (wheel, _, _) = build(WheelConfig::default());
        assert_eq!(wheel.slices().len(), 8);
        assert!((wheel.slice_angle() - 45.0).abs() < 1e-6);
        for (i, slice) in wheel.slices().iter().enumerate() {
            assert_eq!(slice.index, i);
            assert_eq!(slice.name, format!("Slice {}", i));
            assert_eq!(slice.mesh.vertex_count(), 12);
            assert_eq!(slice.mesh.triangle_count(), 10);
        }
    }

    #[test]
    fn test_colors_alternate() {
        let config = WheelConfig::default();
        let (wheel, _, _) = build(config.clone());
        for slice in wheel.slices() {
            let expected = if slice.index % 2 == 0 {
                config.slice_color_a
            } else {
                config.slice_color_b
            };
            assert_eq!(slice.highlighter.color(), expected);
        }
    }

    #[test]
    fn test_slice_zero_straddles_pin() {
        let (wheel, _, _) = build(WheelConfig::default());
        let bounds = wheel.slices()[0].mesh.bounds;
        // Centered on +Y
        assert!(bounds.center().x.abs() < 1e-4);
        assert!(bounds.max.y > 4.9);
    }

    #[test]
    fn test_rejects_empty_wheel() {
        let bus = Rc::new(EventBus::new());
        let config = WheelConfig {
            number_of_slices: 0,
            ..Default::default()
        };
        assert!(Wheel::new(config, 0, None, bus).is_err());
    }

    #[test]
    fn test_rejects_oversized_layout() {
        let bus = Rc::new(EventBus::new());
        let config = WheelConfig {
            number_of_slices: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Wheel::new(config, 0, None, bus.clone()),
            Err(WheelError::InvalidSliceCount)
        ));

        let config = WheelConfig {
            segments: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Wheel::new(config, 0, None, bus),
            Err(WheelError::InvalidSegments)
        ));
    }

    #[test]
    fn test_update_highlights_once_per_change() {
        let (mut wheel, audio, bus) = build(WheelConfig::default());
        let changes = Rc::new(RefCell::new(Vec::new()));
        {
            let changes = changes.clone();
            bus.subscribe(move |e: &SliceChanged| changes.borrow_mut().push(*e), 0, false);
        }

        wheel.update();
        assert_eq!(wheel.highlighted(), Some(0));
        assert!(wheel.slices()[0].highlighter.is_highlighted());
        assert_eq!(audio.played.borrow().len(), 1);

        // Same slice: nothing new
        wheel.update();
        assert_eq!(audio.played.borrow().len(), 1);

        wheel.body_mut().set_rotation(45.0);
        wheel.update();
        assert_eq!(wheel.highlighted(), Some(1));
        assert!(!wheel.slices()[0].highlighter.is_highlighted());
        assert!(wheel.slices()[1].highlighter.is_highlighted());
        assert_eq!(
            *audio.played.borrow(),
            vec![SoundEffect::PinTick, SoundEffect::PinTick]
        );
        assert_eq!(
            *changes.borrow(),
            vec![
                SliceChanged {
                    previous: None,
                    current: 0
                },
                SliceChanged {
                    previous: Some(0),
                    current: 1
                },
            ]
        );

        let lit = wheel
            .slices()
            .iter()
            .filter(|s| s.highlighter.is_highlighted())
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_winning_slice_follows_rotation() {
        let (mut wheel, _, _) = build(WheelConfig::default());
        wheel.body_mut().set_rotation(-90.0);
        assert_eq!(wheel.winning_slice(), 6);
        wheel.body_mut().set_rotation(180.0);
        assert_eq!(wheel.winning_slice(), 4);
    }

    #[test]
    fn test_spin_starts_motion() {
        let (mut wheel, audio, bus) = build(WheelConfig::default());
        let torque = Rc::new(RefCell::new(None));
        {
            let torque = torque.clone();
            bus.subscribe(move |e: &SpinStarted| *torque.borrow_mut() = Some(e.torque), 0, false);
        }

        let applied = wheel.spin();
        assert!(applied < 0.0);
        assert_eq!(wheel.phase(), WheelPhase::Spinning);
        assert!(!wheel.body().is_sleeping());
        assert_eq!(*torque.borrow(), Some(applied));
        assert_eq!(*audio.played.borrow(), vec![SoundEffect::SpinStart]);
    }

    #[test]
    fn test_silent_wheel_without_audio() {
        let bus = Rc::new(EventBus::new());
        let mut wheel = Wheel::new(WheelConfig::default(), 1, None, bus).unwrap();
        wheel.update();
        wheel.spin();
        assert_eq!(wheel.highlighted(), Some(0));
    }
}
