//! End-to-end tests for the todo API client and server live in `tests/`
