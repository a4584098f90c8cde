pub mod jwt;
pub mod lang;
pub mod pricing;
