pub mod fetch;
pub mod generate;
pub mod illustrate;
pub mod plan;
pub mod replicate;
