// Adapters - Engine port implementations

pub mod memory;
