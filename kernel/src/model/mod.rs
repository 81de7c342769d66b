pub mod auth;
pub mod book;
pub mod id;
pub mod notification;
pub mod role;
pub mod student;
