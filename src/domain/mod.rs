// Domain layer: catalog data, models and ports (interfaces). Nothing here talks to the network.

pub mod catalog;
pub mod model;
pub mod ports;
