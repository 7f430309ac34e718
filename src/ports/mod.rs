pub mod cutter;
pub mod provider;
pub mod repository;
