//! API request model
//!
//! Describes one logical API call: base URI, module, optional function
//! and an ordered, mutable parameter bag.

use serde_json::Value;
use url::Url;

/// Ordered request parameters, keyed by parameter name
pub type Parameters = serde_json::Map<String, Value>;

/// A single cPanel API call before it is turned into a concrete URI
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Base URI (scheme, host, port and optional base path/query)
    base_uri: Url,
    /// API module, e.g. `Email`
    module: String,
    /// Module function, e.g. `list_pops`; absent for login/logout
    function: Option<String>,
    /// Query parameters
    parameters: Parameters,
}

impl ApiRequest {
    /// Create a request for the given module without function or parameters
    pub fn new(base_uri: Url, module: impl Into<String>) -> Self {
        Self {
            base_uri,
            module: module.into(),
            function: None,
            parameters: Parameters::new(),
        }
    }

    /// Set the module function
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Set the initial parameters
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Replace all parameters
    pub fn set_parameters(&mut self, parameters: Parameters) -> &mut Self {
        self.parameters = parameters;
        self
    }

    /// Add a parameter, replacing any existing value under the same name
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Remove a parameter; does nothing if it is not set
    pub fn remove_parameter(&mut self, name: &str) -> &mut Self {
        self.parameters.shift_remove(name);
        self
    }
}
