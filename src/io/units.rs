//! Component values in SI base units, for readable parameter setup.
//!
//! ```
//! use csg_dsp::io::units::{kohms, microfarads};
//! let rc = kohms(47.0) * microfarads(1.0);
//! assert!((rc - 0.047).abs() < 1e-12);
//! ```

#[inline]
pub fn ohms(value: f64) -> f64 {
    value
}

#[inline]
pub fn kohms(value: f64) -> f64 {
    value * 1e3
}

#[inline]
pub fn mohms(value: f64) -> f64 {
    value * 1e6
}

#[inline]
pub fn farads(value: f64) -> f64 {
    value
}

#[inline]
pub fn microfarads(value: f64) -> f64 {
    value * 1e-6
}

#[inline]
pub fn nanofarads(value: f64) -> f64 {
    value * 1e-9
}

#[inline]
pub fn picofarads(value: f64) -> f64 {
    value * 1e-12
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    #[test]
    fn scales() {
        assert_eq!(ohms(100.0), 100.0);
        assert_eq!(kohms(47.0), 47_000.0);
        assert!(close(mohms(3.3), 3_300_000.0));
        assert_eq!(farads(1.0), 1.0);
        assert!(close(microfarads(0.047), 47e-9));
        assert!(close(nanofarads(470.0), 470e-9));
        assert!(close(picofarads(470.0), 470e-12));
    }
}
