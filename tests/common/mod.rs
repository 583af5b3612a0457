//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

/// Test helper functions
pub mod helpers {
    use cpanel_requests::{
        Authorization, CPanel, Protocol, config::StorageSettings,
    };
    use std::path::Path;
    use wiremock::MockServer;

    /// Storage below a test directory, with the request log enabled
    pub fn create_test_storage(directory: &Path) -> StorageSettings {
        StorageSettings {
            request_log: true,
            ..StorageSettings::in_directory(directory)
        }
    }

    /// Client talking plain HTTP to the mock server
    pub fn create_test_client(
        server: &MockServer,
        authorization: impl Authorization + 'static,
        directory: &Path,
    ) -> CPanel {
        CPanel::new(Box::new(authorization), server.address().ip().to_string())
            .with_protocol(Protocol::Http)
            .with_port(server.address().port())
            .with_storage(create_test_storage(directory))
    }
}
