pub mod advertisements;
pub mod articles;
pub mod users;
