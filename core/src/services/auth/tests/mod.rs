//! Tests for the token lifecycle service

#[cfg(test)]
mod rotation_tests;
