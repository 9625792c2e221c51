pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Embedding failure: {message}")]
	Embedding { message: String },
	#[error("Index write failure: {message}")]
	IndexWrite { message: String },
	#[error("Index query failure: {message}")]
	IndexQuery { message: String },
	#[error("Generation failure: {message}")]
	Generation { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}

	pub(crate) fn index_write(err: arca_storage::Error) -> Self {
		Self::IndexWrite { message: err.to_string() }
	}

	pub(crate) fn index_query(err: arca_storage::Error) -> Self {
		Self::IndexQuery { message: err.to_string() }
	}
}

impl From<arca_domain::RecordError> for Error {
	fn from(err: arca_domain::RecordError) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
