use thiserror::Error;

/// Result codes of the external engine API, everything but success.
#[derive(Error, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum EngineError {
	#[error("the engine has not been initialized")]
	NotInitialized,
	#[error("invalid parameter")]
	InvalidParameter,
	#[error("invalid state for this call")]
	InvalidState,
	#[error("the feature was not loaded")]
	FeatureMissing,
	#[error("the feature is not supported")]
	FeatureNotSupported,
	#[error("no supported adapter found")]
	NoSupportedAdapterFound,
	#[error("the adapter is not supported")]
	AdapterNotSupported,
	#[error("the driver is out of date")]
	DriverOutOfDate,
	#[error("the operating system is out of date")]
	OsOutOfDate,
	#[error("the operating system has hardware accelerated GPU scheduling disabled")]
	OsDisabledHws,
	#[error("missing or invalid graphics API")]
	MissingOrInvalidApi,
	#[error("an incompatible API capture tool is active")]
	ApiCaptureToolActive,
	#[error("engine call failed with code {0}")]
	Other(i32),
}

impl core::fmt::Debug for EngineError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		core::fmt::Display::fmt(self, f)
	}
}

pub type EngineResult<T> = Result<T, EngineError>;
