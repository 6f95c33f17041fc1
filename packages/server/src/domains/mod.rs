// Business domains
pub mod wizard;
