#[cfg(test)]
mod hasher_tests;
