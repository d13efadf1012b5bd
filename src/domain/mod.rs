// Domain layer: request/catalog models and the ports collaborators implement.

pub mod model;
pub mod ports;
