// Domain layer: request/response models and ports (interfaces) for the backends.

pub mod model;
pub mod ports;
