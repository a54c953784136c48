pub mod resume;
pub mod sanitized;
