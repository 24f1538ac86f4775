pub mod home;
pub mod init;
pub mod posts;
