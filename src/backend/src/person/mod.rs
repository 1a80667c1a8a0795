pub mod controller;
pub mod person_manager;
pub mod person_types;
