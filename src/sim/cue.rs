//! Sound cues
//!
//! The simulation never talks to an audio backend directly. It plays cues
//! through an `AudioSource`, which the host implements (Web Audio on wasm,
//! a logger on native).

use std::fmt;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A new slice passes under the pin
    PinTick,
    /// Wheel pushed
    SpinStart,
    /// Wheel came to rest on a slice
    Winner,
}

/// Something that can play one-shot sounds
pub trait AudioSource {
    fn play_one_shot(&self, clip: SoundEffect);
}

/// A one-shot cue bound to an audio source
///
/// Playing does nothing unless both the clip and the source are set.
#[derive(Clone, Default)]
pub struct AudioCue {
    pub clip: Option<SoundEffect>,
    pub source: Option<Rc<dyn AudioSource>>,
}

impl fmt::Debug for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioCue")
            .field("clip", &self.clip)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl AudioCue {
    pub fn new(clip: Option<SoundEffect>, source: Option<Rc<dyn AudioSource>>) -> Self {
        Self { clip, source }
    }

    pub fn play(&self) {
        let (Some(clip), Some(source)) = (self.clip, &self.source) else {
            return;
        };
        source.play_one_shot(clip);
    }
}

/// Audio source that only logs cues (headless/native runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSource for LogAudio {
    fn play_one_shot(&self, clip: SoundEffect) {
        log::debug!("cue: {:?}", clip);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// Records every cue played
    #[derive(Default)]
    pub struct RecordingAudio {
        pub played: RefCell<Vec<SoundEffect>>,
    }

    impl AudioSource for RecordingAudio {
        fn play_one_shot(&self, clip: SoundEffect) {
            self.played.borrow_mut().push(clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingAudio;
    use super::*;

    #[test]
    fn test_cue_plays_clip() {
        let audio = Rc::new(RecordingAudio::default());
        let cue = AudioCue::new(Some(SoundEffect::PinTick), Some(audio.clone()));
        cue.play();
        cue.play();
        assert_eq!(
            *audio.played.borrow(),
            vec![SoundEffect::PinTick, SoundEffect::PinTick]
        );
    }

    #[test]
    fn test_missing_clip_or_source_is_silent() {
        let audio = Rc::new(RecordingAudio::default());
        AudioCue::new(None, Some(audio.clone())).play();
        AudioCue::new(Some(SoundEffect::Winner), None).play();
        AudioCue::default().play();
        assert!(audio.played.borrow().is_empty());
    }
}
