pub mod dispatch;
pub mod generate;
pub mod init;
pub mod resolve;
pub mod schema;
