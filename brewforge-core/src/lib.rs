pub mod beerxml;
pub mod bitterness;
pub mod breakdown;
pub mod color;
pub mod equipment;
pub mod error;
pub mod gravity;
pub mod numeric;
pub mod pipeline;
pub mod report;
pub mod styles;
pub mod validate;
pub mod volume;

pub use error::BrewforgeError;
pub use pipeline::{calculate, Calculation, RecipeCalculator};
