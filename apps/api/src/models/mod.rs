pub mod journal;
pub mod profile;
pub mod question;
