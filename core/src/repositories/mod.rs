//! Repository interfaces consumed by the domain services.

pub mod key_record;
pub mod user;

pub use key_record::KeyRecordRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use key_record::MockKeyRecordRepository;
#[cfg(test)]
pub use user::MockUserRepository;
