// Domain layer: core models and ports (interfaces). No transport or UI concerns.

pub mod model;
pub mod ports;
