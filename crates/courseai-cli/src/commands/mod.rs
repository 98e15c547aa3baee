pub mod compare;
pub mod grade;
pub mod init;
pub mod queue;
pub mod score;
pub mod validate;
