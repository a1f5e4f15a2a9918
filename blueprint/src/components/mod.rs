pub mod non_native;
pub mod range_check;

pub use range_check::RangeCheck;
