//! Tests for the token codec and key manager


pub(crate) const TEST_RSA_PRIVATE_KEY: &str = include_str!("../../../../tests/fixtures/rsa_private.pem");
pub(crate) const TEST_RSA_PUBLIC_KEY: &str = include_str!("../../../../tests/fixtures/rsa_public.pem");
pub(crate) const TEST_EC_PRIVATE_KEY: &str = include_str!("../../../../tests/fixtures/ec_private.pem");
pub(crate) const TEST_EC_PUBLIC_KEY: &str = include_str!("../../../../tests/fixtures/ec_public.pem");
