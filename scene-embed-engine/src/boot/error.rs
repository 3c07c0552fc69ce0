use thiserror::Error;

/// A single failed fetch attempt. Retryable: the loader retries these up to
/// its bound before falling back to the next origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("script download failed: {url}, status: {status:?}")]
pub struct FetchError {
    pub url: String,
    /// HTTP status for non-2xx responses, `None` for transport errors.
    pub status: Option<u16>,
}

/// Terminal bootstrap failures. Any of these aborts element registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    #[error("script unavailable from every origin: {path}")]
    AllSourcesExhausted { path: String },
    #[error("host capability did not appear within {waited_ms} ms")]
    CapabilityTimeout { waited_ms: u32 },
    #[error("script injection failed: {reason}")]
    InjectionFailed { reason: String },
    #[error("element registration failed: {reason}")]
    RegistrationFailed { reason: String },
}
