pub mod dashboard;
pub mod expenses;
pub mod meals;
pub mod payments;
pub mod settings;
pub mod summary;
