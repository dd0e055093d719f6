// Domain layer: entities and ports. No I/O and no logging.

pub mod model;
pub mod ports;
