pub mod catalog;
pub mod memory;
pub mod user_repository;
