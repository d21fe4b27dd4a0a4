// Domain layer: country records, sync summary and the ports the pipeline is wired through.

pub mod model;
pub mod ports;
