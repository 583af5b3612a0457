//! cPanel API client
//!
//! [`CPanel`] is the entry point of the crate: it knows where the cPanel
//! instance lives, hands each API call to its [`Authorization`] and
//! classifies the answer into a [`Response`].

use crate::{
    Error, Result,
    auth::{self, Authorization},
    config::{Settings, StorageSettings, settings::build_base_uri},
    http::{ApiRequest, Parameters, Protocol, RequestOptions, Response, ResponseFactory},
    resource::{LogFiles, ResourceFile, unique_identifier},
};
use chrono::Utc;
use reqwest::Method;
use std::time::Duration;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

/// Client for one cPanel instance
#[derive(Debug)]
pub struct CPanel {
    authorization: Box<dyn Authorization>,
    host: String,
    port: Option<u16>,
    protocol: Protocol,
    timeout: Option<Duration>,
    storage: StorageSettings,
    log_file: Option<ResourceFile>,
    response_factory: ResponseFactory,
}

impl CPanel {
    /// Client for `host` on the default HTTPS port 2083
    pub fn new(authorization: Box<dyn Authorization>, host: impl Into<String>) -> Self {
        Self {
            authorization,
            host: host.into(),
            port: None,
            protocol: Protocol::default(),
            timeout: None,
            storage: StorageSettings::default(),
            log_file: None,
            response_factory: ResponseFactory::new(),
        }
    }

    /// Build client and authorization from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let authorization = auth::from_settings(settings)?;

        Ok(Self::new(authorization, settings.connection.host.clone())
            .with_protocol(settings.connection.protocol)
            .with_port(settings.connection.port)
            .with_timeout(settings.connection.timeout())
            .with_storage(settings.storage.clone()))
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the protocol; without an explicit port its default port is used
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Timeout for API requests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Storage for the request log
    pub fn with_storage(mut self, storage: StorageSettings) -> Self {
        self.storage = storage;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.protocol.default_port())
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// `{protocol}://{host}:{port}`
    pub fn base_uri(&self) -> Result<Url> {
        build_base_uri(self.protocol, &self.host, self.port())
    }

    pub fn authorization(&self) -> &dyn Authorization {
        self.authorization.as_ref()
    }

    /// Request log file, once the first entry was written
    pub fn log_file(&self) -> Option<&ResourceFile> {
        self.log_file.as_ref()
    }

    /// Call `function` of API `module` with the given parameters.
    ///
    /// Every failure is reported as [`Error::RequestFailed`] with the
    /// underlying error as its source.
    pub async fn api(
        &mut self,
        module: &str,
        function: &str,
        parameters: Parameters,
    ) -> Result<Response> {
        let request_id = unique_identifier("request-");
        let span = info_span!("api", request_id = %request_id, module, function);

        async {
            let result = self.send(module, function, parameters).await;

            match &result {
                Ok(response) if response.original_response().status().as_u16() >= 400 => {
                    let status = response.original_response().status();
                    warn!("API request returned HTTP status {}", status);
                    self.write_request_log(&request_id, module, function, &status.to_string());
                }
                Ok(response) => {
                    debug!("API request returned {} response", response.kind());
                }
                Err(e) => {
                    warn!("API request failed: {}", e);
                    self.write_request_log(&request_id, module, function, &e.to_string());
                }
            }

            result.map_err(Error::into_request_failed)
        }
        .instrument(span)
        .await
    }

    /// Log out and release server-side state
    pub async fn close(&mut self) -> Result<()> {
        self.authorization.close().await
    }

    async fn send(
        &mut self,
        module: &str,
        function: &str,
        parameters: Parameters,
    ) -> Result<Response> {
        let request = ApiRequest::new(self.base_uri()?, module)
            .with_function(function)
            .with_parameters(parameters);

        let mut options = RequestOptions::new();
        if let Some(timeout) = self.timeout {
            options = options.with_timeout(timeout);
        }

        let raw = self
            .authorization
            .send_authorized_request(Method::GET, &request, options)
            .await?;

        self.response_factory.create_from_response(raw)
    }

    fn write_request_log(
        &mut self,
        request_id: &str,
        module: &str,
        function: &str,
        outcome: &str,
    ) {
        if !self.storage.request_log {
            return;
        }

        let line = format!(
            "[{}] {} WARNING GET {}/{} {}",
            Utc::now().to_rfc3339(),
            request_id,
            module,
            function,
            outcome
        );

        if self.log_file.is_none() {
            match LogFiles::from_settings(&self.storage).create() {
                Ok(file) => self.log_file = Some(file),
                Err(e) => {
                    warn!("Failed to create request log: {}", e);
                    return;
                }
            }
        }

        if let Some(file) = &self.log_file {
            if let Err(e) = file.append_line(&line) {
                warn!("Failed to write request log: {}", e);
            }
        }
    }
}
