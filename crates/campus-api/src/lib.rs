// campus-api: connectivity and request dispatch for the Campus LMS admin API
//
// Endpoint resolution (deployment-aware candidate probing), credential
// selection (admin over user), and a request client that applies auth,
// unwraps response envelopes, and invalidates the session on 401.

pub mod client;
pub mod credentials;
pub mod deployment;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod request;
pub mod session;
pub mod storage;
pub mod transport;

pub use client::ApiClient;
pub use credentials::{AuthMode, Credential, CredentialScope, scoped_credential, select_credential};
pub use deployment::{DEFAULT_GATEWAY_PATTERNS, DeploymentConfig, LOCAL_DEFAULT_BASE};
pub use endpoint::{CandidateEndpoints, EndpointResolver, HttpProbe, LivenessProbe, Resolution};
pub use envelope::{Envelope, Payload};
pub use error::Error;
pub use request::RequestContext;
pub use session::{LoginRedirect, NoRedirect, Session};
pub use storage::{MemoryStore, SessionStore, StorageError};
pub use transport::{TlsMode, TransportConfig};
