//! End-to-end protocol scenarios
