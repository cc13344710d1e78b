// Service exports
pub mod mailer;
pub mod matchmaking;
pub mod memory;
pub mod postgres;
pub mod store;

pub use mailer::{EmailMessage, LogMailer, MailerError, Notifier, SmtpMailer};
pub use matchmaking::{Counterpart, FounderOutcome, Matchmaker, MatchmakingError, RematchOutcome};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{Store, StoreError};
