// Domain layer: value types and ports. No HTTP or storage details here.

pub mod model;
pub mod ports;
