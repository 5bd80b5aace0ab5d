pub mod assignment;
pub mod intake;
pub mod synthetic;
