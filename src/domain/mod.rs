// Domain layer: value types and the ports the rating service depends on.

pub mod model;
pub mod ports;
