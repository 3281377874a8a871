//! MySQL repository implementations

mod key_record_repository_impl;
mod user_repository_impl;

pub use key_record_repository_impl::MySqlKeyRecordRepository;
pub use user_repository_impl::MySqlUserRepository;
