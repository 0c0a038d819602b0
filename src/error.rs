//! Errors raised while configuring or controlling an engine.
//!
//! The update path itself never fails; every parameter combination has a
//! defined output. These only come from the control surface.

/// Error type for engine configuration and the control queue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CsgError {
    #[error("Sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("Invalid {name} resistance: {value} ohms")]
    InvalidResistance { name: &'static str, value: f64 },

    #[error("Control queue is full")]
    ControlQueueFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CsgError::InvalidResistance {
            name: "amplitude",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid amplitude resistance: -1 ohms");
        assert_eq!(CsgError::ControlQueueFull.to_string(), "Control queue is full");
    }
}
