pub mod catalog;
pub mod generator;
pub mod injector;
pub mod params;
