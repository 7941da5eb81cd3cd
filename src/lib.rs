pub mod control;
pub mod plant;
pub mod sim;
pub mod io;

// Flat re-exports for the common entry points
pub use control::{ControlValue, Gains, Mode, Pid, Regulator, ScalarPid, VectorPid};
pub use plant::{PointMass, PointMass1, PointMass3};
pub use sim::{run, LoopConfig, Sample};
