//! HTTP-level integration tests.

mod file_test;
mod folder_test;
mod helpers;
