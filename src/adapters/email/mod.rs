//! Outbound mail adapters.
//!
//! - `smtp` - Delivery through an SMTP relay (lettre)
//! - `logging` - Writes messages to the log, for development
//! - `recording` - Keeps messages in memory, for tests

mod logging;
mod recording;
mod smtp;

pub use logging::LoggingMailer;
pub use recording::RecordingMailer;
pub use smtp::SmtpMailer;
