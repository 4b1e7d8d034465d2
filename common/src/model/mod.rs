pub mod field;
pub mod mapping;
pub mod row;
pub mod upload;
pub mod validation;
