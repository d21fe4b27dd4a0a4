// Adapters layer: concrete implementations of the domain ports (http source, stores).

pub mod http;
pub mod memory;
pub mod postgres;
