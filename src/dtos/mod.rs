pub mod dashboard;
pub mod import;
pub mod product;
pub mod report;
pub mod sale;
