pub mod analyze;
pub mod checks;
