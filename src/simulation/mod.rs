pub mod states;
pub mod params;
pub mod engine;
pub mod orbit;
pub mod field;
pub mod stepper;
pub mod scenario;
