//! HTTP level tests for the GitHub forge against a mock server.
