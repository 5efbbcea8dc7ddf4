use crate::error::ClockError;

/// A validated playback position in seconds: finite and non-negative.
///
/// The transport owns the clock; the core only receives samples of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ClockTime(f64);

impl ClockTime {
    pub const ZERO: ClockTime = ClockTime(0.0);

    pub fn new(secs: f64) -> Result<Self, ClockError> {
        if !secs.is_finite() {
            return Err(ClockError::NotFinite(secs));
        }
        if secs < 0.0 {
            return Err(ClockError::Negative(secs));
        }
        Ok(Self(secs))
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ClockTime {
    type Error = ClockError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

/// How the clock moved between two consecutive ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockStep {
    /// First sample after construction or a score load.
    Start,
    /// Normal playback (or pause): `from <= now`, within the jump threshold.
    Advance { from: f64 },
    /// Backward step, or a forward jump beyond the threshold.
    Seek { from: f64 },
}

impl ClockStep {
    /// `max_forward` is the largest forward step still treated as playback;
    /// callers derive it from the frame delta so slow frames are not seeks.
    pub fn classify(prev: Option<ClockTime>, now: ClockTime, max_forward: f64) -> Self {
        match prev {
            None => ClockStep::Start,
            Some(p) => {
                let delta = now.secs() - p.secs();
                if delta < 0.0 || delta > max_forward {
                    ClockStep::Seek { from: p.secs() }
                } else {
                    ClockStep::Advance { from: p.secs() }
                }
            }
        }
    }

    pub fn is_seek(self) -> bool {
        matches!(self, ClockStep::Seek { .. })
    }
}
