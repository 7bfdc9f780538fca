//! Processor configuration.
//!
//! [`ProcessorConfig`] carries everything the engine needs to know about its
//! host: the names of the two capability types callback parameters are
//! checked against, where generated code finds the runtime crate, and how
//! generated units are named.
//!
//! # Example
//!
//! ```
//! use vigil_codegen::config::ProcessorConfig;
//!
//! let config = ProcessorConfig::default()
//!     .with_runtime_path("::my_app::lifecycle")
//!     .with_call_logger(false);
//!
//! assert_eq!(config.owner_type, "LifecycleOwner");
//! assert!(!config.call_logger);
//! ```

/// Capability type a callback's first parameter must be assignable to.
pub const DEFAULT_OWNER_TYPE: &str = "LifecycleOwner";

/// Type a callback's second parameter must be exactly.
pub const DEFAULT_EVENT_TYPE: &str = "LifecycleEvent";

/// Path generated code uses to reach the runtime crate.
pub const DEFAULT_RUNTIME_PATH: &str = "::vigil_lifecycle";

/// Suffix appended to the class name to form the generated unit name.
pub const DEFAULT_ADAPTER_SUFFIX: &str = "LifecycleAdapter";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Name of the lifecycle owner capability type.
    pub owner_type: String,
    /// Name of the lifecycle event type.
    pub event_type: String,
    /// Path to the runtime crate in generated code.
    pub runtime_path: String,
    /// Suffix of generated adapter names.
    pub adapter_suffix: String,
    /// Whether generated calls are guarded by a `MethodCallsLogger`.
    pub call_logger: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            owner_type: DEFAULT_OWNER_TYPE.to_string(),
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            adapter_suffix: DEFAULT_ADAPTER_SUFFIX.to_string(),
            call_logger: true,
        }
    }
}

impl ProcessorConfig {
    /// Sets the lifecycle owner capability type name.
    #[must_use]
    pub fn with_owner_type(mut self, owner_type: impl Into<String>) -> Self {
        self.owner_type = owner_type.into();
        self
    }

    /// Sets the lifecycle event type name.
    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Sets the runtime crate path used by generated code.
    #[must_use]
    pub fn with_runtime_path(mut self, runtime_path: impl Into<String>) -> Self {
        self.runtime_path = runtime_path.into();
        self
    }

    /// Sets the generated adapter name suffix.
    #[must_use]
    pub fn with_adapter_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.adapter_suffix = suffix.into();
        self
    }

    /// Enables or disables `MethodCallsLogger` guards in generated code.
    #[must_use]
    pub fn with_call_logger(mut self, enabled: bool) -> Self {
        self.call_logger = enabled;
        self
    }
}
