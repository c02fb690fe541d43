//! Cross-crate integration test suite. See the `tests/` directory.
