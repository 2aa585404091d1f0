//! Remote procedure client abstraction.

use async_trait::async_trait;
use chatline_application::AdapterError;
use chatline_domain::FailureCategory;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to a remote session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcCallError {
    #[error("Failed to reach remote session: {0}")]
    Connect(String),

    #[error("Remote call timed out")]
    Timeout,

    #[error("HTTP {status} from remote session")]
    Status { status: u16 },

    #[error("Procedure {procedure} failed: {message}")]
    Remote { procedure: String, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl RpcCallError {
    /// Whether the session handle should be thrown away and rebuilt.
    ///
    /// A procedure that ran and raised an error leaves the session usable;
    /// everything else might mean the session is gone.
    pub fn invalidates_session(&self) -> bool {
        !matches!(self, RpcCallError::Remote { .. })
    }

    pub fn to_adapter_error(&self) -> AdapterError {
        match self {
            RpcCallError::Connect(msg) => AdapterError::Connection(msg.clone()),
            RpcCallError::Timeout => AdapterError::transport(FailureCategory::Timeout),
            RpcCallError::Status { status } => match FailureCategory::from_status(*status) {
                Some(category) => AdapterError::transport(category),
                None => AdapterError::Unknown(self.to_string()),
            },
            RpcCallError::Remote { message, .. } => {
                AdapterError::transport_with_detail(FailureCategory::Server, message.clone())
            }
            RpcCallError::Protocol(msg) => AdapterError::Unknown(msg.clone()),
        }
    }
}

/// Opens sessions on a remote procedure endpoint.
#[async_trait]
pub trait RemoteProcedureConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn RemoteProcedureSession>, RpcCallError>;
}

/// An open remote session.
#[async_trait]
pub trait RemoteProcedureSession: Send + Sync {
    /// Invoke `procedure` with named arguments, in declaration order.
    async fn call(&self, procedure: &str, args: &[(&str, Value)]) -> Result<Value, RpcCallError>;
}
