//! Simulated audio playback primitive
//!
//! Stands in for a real decoder/output backend: it reports load
//! completion after a configurable number of frames, advances its
//! playhead by `rate * step` per tick while playing, and emits `Ended`
//! at the track end (or wraps when looping). The mixer talks to it
//! through the same [`AudioPlayer`] trait a real backend would
//! implement.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use lockstep_core::player::{AudioPlayer, PlayerEvent};

struct SimState {
    source: String,
    position: f32,
    duration: f32,
    playing: bool,
    looping: bool,
    muted: bool,
    volume: f32,
    rate: f32,
    /// Frames remaining until the load "completes"
    load_frames: u32,
    loaded: bool,
    events: VecDeque<PlayerEvent>,
}

/// Trait-facing half, owned by a channel controller
pub struct SimPlayer {
    state: Rc<RefCell<SimState>>,
}

/// Clock-facing half, kept by the demo loop to advance the simulation
pub struct SimHandle {
    state: Rc<RefCell<SimState>>,
}

/// Create a simulated primitive with the given track duration and load
/// latency in frames
pub fn sim_player(duration: f32, load_frames: u32) -> (SimPlayer, SimHandle) {
    let state = Rc::new(RefCell::new(SimState {
        source: String::new(),
        position: 0.0,
        duration,
        playing: false,
        looping: false,
        muted: false,
        volume: 1.0,
        rate: 1.0,
        load_frames,
        loaded: false,
        events: VecDeque::new(),
    }));
    (
        SimPlayer {
            state: Rc::clone(&state),
        },
        SimHandle { state },
    )
}

impl SimHandle {
    /// Advance the simulation by one frame of `step` timeline units
    pub fn tick(&self, step: f32) {
        let mut s = self.state.borrow_mut();

        if !s.loaded {
            if s.load_frames > 0 {
                s.load_frames -= 1;
            }
            if s.load_frames == 0 {
                s.loaded = true;
                let duration = s.duration;
                s.events.push_back(PlayerEvent::Loaded { duration });
                log::debug!("sim {} finished loading", s.source);
            }
            return;
        }

        if !s.playing {
            return;
        }

        s.position += s.rate * step;
        if s.position >= s.duration {
            if s.looping {
                s.position -= s.duration;
            } else {
                s.position = s.duration;
                s.playing = false;
                s.events.push_back(PlayerEvent::Ended);
                log::debug!("sim {} reached track end", s.source);
            }
        }
    }
}

impl AudioPlayer for SimPlayer {
    fn load(&mut self, source: &str) {
        self.state.borrow_mut().source = source.to_string();
    }

    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = true;
        s.events.push_back(PlayerEvent::Played);
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = false;
        s.position = 0.0;
    }

    fn seek(&mut self, position: f32) {
        let mut s = self.state.borrow_mut();
        s.position = position.clamp(0.0, s.duration);
    }

    fn position(&self) -> f32 {
        self.state.borrow().position
    }

    fn duration(&self) -> Option<f32> {
        let s = self.state.borrow();
        s.loaded.then_some(s.duration)
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn set_loop(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }

    fn set_mute(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn set_rate(&mut self, rate: f32) {
        self.state.borrow_mut().rate = rate;
    }

    fn poll(&mut self) -> Option<PlayerEvent> {
        self.state.borrow_mut().events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_completes_after_configured_frames() {
        let (mut player, handle) = sim_player(30.0, 3);
        player.load("kick.ogg");

        handle.tick(1.0);
        handle.tick(1.0);
        assert!(player.poll().is_none());

        handle.tick(1.0);
        assert_eq!(player.poll(), Some(PlayerEvent::Loaded { duration: 30.0 }));
        assert_eq!(player.duration(), Some(30.0));
    }

    #[test]
    fn test_playback_ends_at_duration() {
        let (mut player, handle) = sim_player(2.0, 1);
        player.load("hat.ogg");
        handle.tick(1.0);
        player.poll();

        player.play();
        assert_eq!(player.poll(), Some(PlayerEvent::Played));

        handle.tick(1.0);
        handle.tick(1.0);
        assert_eq!(player.position(), 2.0);
        assert_eq!(player.poll(), Some(PlayerEvent::Ended));
    }

    #[test]
    fn test_loop_wraps_instead_of_ending() {
        let (mut player, handle) = sim_player(2.0, 1);
        player.load("loop.ogg");
        handle.tick(1.0);
        player.poll();

        player.set_loop(true);
        player.play();
        player.poll();

        handle.tick(1.5);
        handle.tick(1.0);
        assert!(player.position() < 2.0);
        assert!(player.poll().is_none());
    }

    #[test]
    fn test_stop_resets_position() {
        let (mut player, handle) = sim_player(10.0, 1);
        player.load("bass.ogg");
        handle.tick(1.0);
        player.poll();

        player.play();
        handle.tick(3.0);
        assert_eq!(player.position(), 3.0);

        player.stop();
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn test_rate_scales_advancement() {
        let (mut player, handle) = sim_player(10.0, 1);
        player.load("pad.ogg");
        handle.tick(1.0);
        player.poll();

        player.set_rate(2.0);
        player.play();
        handle.tick(1.0);
        assert_eq!(player.position(), 2.0);
    }
}
