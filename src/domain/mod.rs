// Domain layer: medal records, derived views and the ports the dashboard talks through.

pub mod model;
pub mod ports;
