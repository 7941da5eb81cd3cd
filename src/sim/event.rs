use super::runner::Sample;

// ---------------------------------------------------------------------------
// Response events
// ---------------------------------------------------------------------------

/// Kinds of response events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Error changed sign (overshoot onset).
    ZeroCrossing,
    /// Error entered the ± band around zero.
    EnteredBand { band: f64 },
    /// Output pinned at the clamp bound.
    Saturated { bound: f64 },
}

/// A discrete event observed in a response trace.
#[derive(Debug, Clone)]
pub struct ResponseEvent {
    pub time: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Sample<f64>, current: &Sample<f64>) -> Option<EventKind>;
}

/// Detects the first sign change of the error.
pub struct CrossingDetector {
    fired: bool,
}

impl CrossingDetector {
    pub fn new() -> Self {
        Self { fired: false }
    }
}

impl Default for CrossingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDetector for CrossingDetector {
    fn check(&mut self, prev: &Sample<f64>, current: &Sample<f64>) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.error * current.error < 0.0 {
            self.fired = true;
            Some(EventKind::ZeroCrossing)
        } else {
            None
        }
    }
}

/// Detects the first entry into a ± error band.
pub struct BandDetector {
    pub band: f64,
    fired: bool,
}

impl BandDetector {
    pub fn new(band: f64) -> Self {
        Self { band, fired: false }
    }
}

impl EventDetector for BandDetector {
    fn check(&mut self, prev: &Sample<f64>, current: &Sample<f64>) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.error.abs() > self.band && current.error.abs() <= self.band {
            self.fired = true;
            Some(EventKind::EnteredBand { band: self.band })
        } else {
            None
        }
    }
}

/// Detects the first output component pinned at the clamp bound.
pub struct SaturationDetector {
    pub bound: f64,
    fired: bool,
}

impl SaturationDetector {
    pub fn new(bound: f64) -> Self {
        Self { bound, fired: false }
    }
}

impl EventDetector for SaturationDetector {
    fn check(&mut self, _prev: &Sample<f64>, current: &Sample<f64>) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if self.bound > 0.0 && current.output.abs() >= self.bound {
            self.fired = true;
            Some(EventKind::Saturated { bound: self.bound })
        } else {
            None
        }
    }
}

/// Run every detector over consecutive sample pairs, in trace order.
pub fn scan(
    samples: &[Sample<f64>],
    detectors: &mut [Box<dyn EventDetector>],
) -> Vec<ResponseEvent> {
    let mut events = Vec::new();
    for pair in samples.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(ResponseEvent { time: pair[1].time, kind });
            }
        }
    }
    events
}
