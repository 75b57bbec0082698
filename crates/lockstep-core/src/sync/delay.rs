//! Delay mapping between master and channel-local seek positions
//!
//! A channel's delay shifts its entry point later on the master
//! timeline: local position = master position - delay. Clamping is left
//! to the caller because the policy differs by context (display
//! propagation clamps and keeps going; play/pause propagation suppresses
//! playback instead).

/// Map a master seek position to a channel-local target
///
/// The result may be negative (the channel's entry is still in the
/// future) or past the track end (the channel has already finished).
#[inline]
pub fn local_seek_target(master_seek: f32, delay: f32) -> f32 {
    master_seek - delay
}

/// Clamp a local seek target into the playable range `[0, duration]`
#[inline]
pub fn clamp_to_track(target: f32, duration: f32) -> f32 {
    target.clamp(0.0, duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_master_minus_delay() {
        assert_eq!(local_seek_target(30.0, 20.0), 10.0);
        assert_eq!(local_seek_target(10.0, 20.0), -10.0);
        assert_eq!(local_seek_target(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamped_target_stays_in_range() {
        // Whenever master - delay already lies in [0, duration],
        // clamping must not move it.
        for (master, delay, duration) in [
            (0.0, 0.0, 60.0),
            (45.0, 10.0, 60.0),
            (60.0, 0.0, 60.0),
            (99.9, 50.0, 120.0),
        ] {
            let target = local_seek_target(master, delay);
            let clamped = clamp_to_track(target, duration);
            assert!(clamped >= 0.0 && clamped <= duration);
            if target >= 0.0 && target <= duration {
                assert_eq!(clamped, target);
            }
        }
    }

    #[test]
    fn test_clamp_boundaries() {
        assert_eq!(clamp_to_track(-10.0, 60.0), 0.0);
        assert_eq!(clamp_to_track(75.0, 60.0), 60.0);
        assert_eq!(clamp_to_track(60.0, 60.0), 60.0);
    }
}
