pub mod jwt;
pub mod rbac;
pub mod validate;
