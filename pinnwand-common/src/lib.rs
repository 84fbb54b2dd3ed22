pub mod model;
pub mod timestamp;
