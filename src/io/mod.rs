// Purpose - host-facing helpers: gate edge detection, component units

pub mod gate;
pub mod units;
