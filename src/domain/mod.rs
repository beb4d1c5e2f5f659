// Domain layer: job-listing models and ports (interfaces).

pub mod model;
pub mod ports;
