pub mod point_mass;

pub use point_mass::{PointMass, PointMass1, PointMass3};
