mod orientation;
mod runner;
mod spring;

pub use orientation::{
    FixedOrientation, NeutralOrientation, OrientationSource, SyntheticOrientation,
};
pub use runner::MotionRunner;
pub use spring::{
    SimulationState, TiltSimulator, DAMPING, NOMINAL_TICK_HZ, STIFFNESS, VELOCITY_GAIN,
};
