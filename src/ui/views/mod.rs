pub mod error;
pub mod material;
pub mod quiz;
pub mod results;
