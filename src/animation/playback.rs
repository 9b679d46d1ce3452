//! Preview playback state machine
//!
//! Playback advances the active keyframe once per display refresh. Every
//! start hands out a fresh [`PlaybackToken`]; stopping invalidates it, so a
//! refresh that was already scheduled before the stop is ignored.

/// Identifies one playing session. Stale tokens are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackToken(u64);

impl PlaybackToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Playback status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Stopped,
    Playing(PlaybackToken),
}

/// Stopped/Playing state machine with generation-based cancellation
#[derive(Clone, Debug)]
pub struct Playback {
    status: PlaybackStatus,
    generation: u64,
}

impl Playback {
    pub fn new() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            generation: 0,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.status, PlaybackStatus::Playing(_))
    }

    /// Current live token, if playing
    pub fn token(&self) -> Option<PlaybackToken> {
        match self.status {
            PlaybackStatus::Playing(token) => Some(token),
            PlaybackStatus::Stopped => None,
        }
    }

    /// Start playing. Already playing keeps the current token.
    pub fn start(&mut self) -> PlaybackToken {
        if let PlaybackStatus::Playing(token) = self.status {
            return token;
        }
        self.generation += 1;
        let token = PlaybackToken(self.generation);
        self.status = PlaybackStatus::Playing(token);
        token
    }

    /// Stop playing. Returns the token that was cancelled, if any.
    pub fn stop(&mut self) -> Option<PlaybackToken> {
        let cancelled = self.token();
        self.status = PlaybackStatus::Stopped;
        cancelled
    }

    /// Whether a refresh carrying `token` may advance the timeline
    pub fn accept(&self, token: PlaybackToken) -> bool {
        self.token() == Some(token)
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

/// Next index of a looping sequence of `len` frames.
///
/// A stale index past the end wraps through the modulo as well.
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index % len + 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop_cycle() {
        let mut playback = Playback::new();
        assert!(!playback.is_playing());

        let token = playback.start();
        assert!(playback.is_playing());
        assert!(playback.accept(token));

        assert_eq!(playback.stop(), Some(token));
        assert!(!playback.is_playing());
        assert!(!playback.accept(token));
        assert_eq!(playback.stop(), None);
    }

    #[test]
    fn test_restart_issues_new_token() {
        let mut playback = Playback::new();
        let first = playback.start();
        playback.stop();
        let second = playback.start();

        assert_ne!(first, second);
        assert!(!playback.accept(first));
        assert!(playback.accept(second));
    }

    #[test]
    fn test_start_while_playing_is_idempotent() {
        let mut playback = Playback::new();
        let token = playback.start();
        assert_eq!(playback.start(), token);
    }

    #[test]
    fn test_next_index_cycles() {
        for len in 1..6 {
            for start in 0..len {
                let mut index = start;
                for _ in 0..len {
                    index = next_index(index, len);
                }
                assert_eq!(index, start);
            }
        }
        assert_eq!(next_index(9, 3), 1);
        assert_eq!(next_index(0, 0), 0);
    }
}
