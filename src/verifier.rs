//! Validation orchestration: request parsing, nonce checks, signer resolution, and signature
//! verification run in a fixed order.
//!
//! [`Verifier::validate`] never lets an invalid client skip signature verification: the
//! client verdict and the signature verdict are computed independently and merged only when
//! the call returns. Nonce rejections are the one early exit after parsing.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	obs::{self, ValidationOutcome, ValidationSpan},
	request::ProviderRequest,
	signature,
	store::{ClientStore, SignerLookup, StoreError},
};

/// Knobs that shape request normalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
	/// Authorization scheme token, matched case-insensitively (default `OAuth`).
	pub auth_scheme: String,
	/// Scheme assumed for origin-form request targets (default `https`).
	pub default_uri_scheme: String,
	/// Whether form-encoded bodies contribute parameters (default `true`).
	pub collect_body_params: bool,
}
impl VerifierConfig {
	/// Overrides the Authorization scheme token.
	pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.auth_scheme = scheme.into();

		self
	}

	/// Overrides the scheme assumed for origin-form request targets.
	pub fn with_default_uri_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.default_uri_scheme = scheme.into();

		self
	}

	/// Enables or disables form body parameter collection.
	pub fn with_body_params(mut self, enabled: bool) -> Self {
		self.collect_body_params = enabled;

		self
	}

	/// Checks that the configuration can be used.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.auth_scheme.is_empty() || self.auth_scheme.chars().any(char::is_whitespace) {
			return Err(ConfigError::InvalidAuthScheme { scheme: self.auth_scheme.clone() });
		}
		if !matches!(self.default_uri_scheme.as_str(), "http" | "https") {
			return Err(ConfigError::UnsupportedUriScheme {
				scheme: self.default_uri_scheme.clone(),
			});
		}

		Ok(())
	}
}
impl Default for VerifierConfig {
	fn default() -> Self {
		Self {
			auth_scheme: "OAuth".into(),
			default_uri_scheme: "https".into(),
			collect_body_params: true,
		}
	}
}

/// Validates OAuth 1.0 signed requests against a [`ClientStore`].
#[derive(Debug)]
pub struct Verifier<S = dyn ClientStore>
where
	S: ?Sized + ClientStore,
{
	store: Arc<S>,
	config: VerifierConfig,
}
impl<S> Verifier<S>
where
	S: ?Sized + ClientStore,
{
	/// Creates a verifier with the default configuration.
	pub fn new(store: impl Into<Arc<S>>) -> Self {
		Self { store: store.into(), config: VerifierConfig::default() }
	}

	/// Replaces the configuration after validating it.
	pub fn with_config(mut self, config: VerifierConfig) -> Result<Self, ConfigError> {
		config.validate()?;

		self.config = config;

		Ok(self)
	}

	/// Active configuration.
	pub fn config(&self) -> &VerifierConfig {
		&self.config
	}

	/// Returns `Ok(())` when `request` carries a valid signature from a known client with a
	/// fresh nonce.
	///
	/// Stages run in order: parse and guard, nonce check (early exit), signer resolution,
	/// signature verification. Signature verification runs even when the client is rejected,
	/// and client rejections surface as [`Error::SignatureMismatch`].
	pub async fn validate<B>(&self, request: &Request<B>) -> Result<()>
	where
		B: AsRef<[u8]>,
	{
		observe("validate", run(self.store.as_ref(), &self.config, request)).await
	}
}

/// Validates `request` against `store` using [`VerifierConfig::default`].
pub async fn validate_signature<B>(request: &Request<B>, store: &dyn ClientStore) -> Result<()>
where
	B: AsRef<[u8]>,
{
	let config = VerifierConfig::default();

	observe("validate_signature", run(store, &config, request)).await
}

async fn observe<Fut>(stage: &'static str, validation: Fut) -> Result<()>
where
	Fut: Future<Output = Result<()>>,
{
	let span = ValidationSpan::new(stage);

	obs::record_validation_outcome(ValidationOutcome::Attempt, "none");

	let result = span.instrument(validation).await;

	match &result {
		Ok(()) => obs::record_validation_outcome(ValidationOutcome::Accepted, "none"),
		Err(e) => {
			obs::trace_rejection(e);
			obs::record_validation_outcome(ValidationOutcome::Rejected, e.label());
		},
	}

	result
}

async fn run<S, B>(store: &S, config: &VerifierConfig, request: &Request<B>) -> Result<()>
where
	S: ?Sized + ClientStore,
	B: AsRef<[u8]>,
{
	let preq = ProviderRequest::parse(request, config)?;
	let head = preq.head();

	store
		.check_nonce(preq.client_key(), preq.nonce(), preq.timestamp(), head)
		.await
		.map_err(nonce_error)?;

	let SignerLookup { signer, outcome: client_outcome } =
		store.resolve_signer(preq.client_key(), preq.signature_method(), head).await;
	// Runs whatever the client verdict is.
	let signature_outcome = signature::verify_signature(&preq, signer.as_deref());

	client_outcome.map_err(client_error)?;

	signature_outcome
}

fn nonce_error(error: StoreError) -> Error {
	if error.is_backend() { Error::Storage(error) } else { Error::Replay(error) }
}

fn client_error(error: StoreError) -> Error {
	if error.is_backend() {
		return Error::Storage(error);
	}

	obs::trace_collapsed("client", &error);

	Error::SignatureMismatch
}
