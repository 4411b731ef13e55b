pub mod heston;
pub mod model;
