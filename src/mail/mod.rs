pub mod smtp;

pub use smtp::SmtpClient;
