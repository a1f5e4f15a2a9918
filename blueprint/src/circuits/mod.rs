pub mod assignment;
pub mod circuit;
pub mod expr;
pub mod gate;
pub mod params;
pub mod wires;

pub use assignment::Assignment;
pub use circuit::Circuit;
pub use params::ArithmetizationParams;
