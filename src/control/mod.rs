pub mod value;
pub mod gains;
pub mod pid;
pub mod regulator;

pub use value::ControlValue;
pub use gains::{Gains, Mode};
pub use pid::{Pid, ScalarPid, VectorPid};
pub use regulator::Regulator;
