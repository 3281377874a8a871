#[cfg(test)]
mod mock_tests;
