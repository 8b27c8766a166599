pub mod ramp;
pub mod wallet;
