//! In-memory stores
//!
//! Process-local implementations of the repository traits. State is lost on
//! restart, so these back the development profile and the test suites.

mod key_record_store;
mod user_store;


pub use key_record_store::InMemoryKeyRecordRepository;
pub use user_store::InMemoryUserRepository;
