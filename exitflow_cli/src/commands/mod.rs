pub mod catalog;
pub mod init;
pub mod user;
pub mod workflow;
