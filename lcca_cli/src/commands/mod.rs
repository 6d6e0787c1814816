pub mod catalog;
pub mod run;
pub mod works;
