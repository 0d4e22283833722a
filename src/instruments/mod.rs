//! Instrument definitions accepted by the pricing engines.

pub mod vanilla;

pub use vanilla::VanillaOption;
