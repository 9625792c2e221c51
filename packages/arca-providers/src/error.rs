pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("Header name is invalid: {0}")]
	HeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error("Header value is invalid: {0}")]
	HeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Default header {name} must have a string value.")]
	NonStringHeader { name: String },
	/// The provider answered with a non-2xx status. `body` is its reply, trimmed.
	#[error("Provider returned HTTP {status}: {body}")]
	Status { status: u16, body: String },
	#[error("Provider response is malformed: {message}")]
	InvalidResponse { message: String },
}
