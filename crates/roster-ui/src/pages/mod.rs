pub mod login;
pub mod students;
