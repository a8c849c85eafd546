use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by flight operations.
///
/// Lifecycle refusals (takeoff while sabotaged, commands while grounded) are
/// command outcomes, not errors; these variants cover genuinely invalid
/// input and violated model assumptions. All of them are recoverable at the
/// command level; the loop keeps accepting commands after any of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    /// The pitch/roll ring math only supports the four-engine layout.
    #[error("unsupported engine count: ring math needs {expected} engines, drone has {actual}")]
    UnsupportedEngineCount { expected: usize, actual: usize },

    /// A power vector must carry exactly one level per engine.
    #[error("power vector has {given} levels for {engines} engines")]
    PowerVectorMismatch { given: usize, engines: usize },

    /// Pitch and roll nonzero at once. The motion model assumes single-axis
    /// tilt, so the velocity estimate is degraded, not trustworthy.
    #[error("attitude anomaly: pitch {pitch:.2} and roll {roll:.2} are both nonzero")]
    AttitudeAnomaly { pitch: f64, roll: f64 },

    /// Emergency landing requested with no destroyed engine on board.
    #[error("no destroyed engine to compensate for")]
    NoDestroyedEngine,

    /// Fault injection found nothing left to destroy.
    #[error("no live engine to destroy")]
    NoLiveEngine,

    /// Direction token outside the supported set.
    #[error("unknown direction `{0}`")]
    UnknownDirection(String),
}
