pub mod admin;
pub mod earthquake;
pub mod settings;
