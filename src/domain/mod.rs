// Domain layer: models, ports and the date rules. No I/O here.

pub mod dates;
pub mod model;
pub mod ports;
