use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ConfirmerError {
	/// Steam rejected the signature. The identity secret is wrong and retrying won't help.
	#[error("Steam says the mobile authenticator is providing incorrect codes. The identity secret is invalid.")]
	InvalidCredentials,
	/// Nothing to act on. Also covers failed responses, which Steam doesn't distinguish from an empty list.
	#[error("Expected a confirmation, but none was found.")]
	ConfirmationExpected,
	#[error("Invalid session, login or token refresh required.")]
	SessionExpired,
	#[error("Failed to decode response: {0}")]
	DecodeError(String),
	#[error("Network failure: {0}")]
	NetworkError(#[from] TransportError),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ConfirmerError {
	fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::DecodeError(format!("{} (at {})", err.inner(), err.path()))
	}
}
