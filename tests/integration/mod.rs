//! Integration tests for individual AKX components

mod dispatcher_tests;
mod single_auth_tests;
