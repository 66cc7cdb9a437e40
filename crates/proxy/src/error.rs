use decoy_primitives::CatalogError;
use thiserror::Error;

use crate::key::CacheKey;

/// Boxed failure reported by a proxy generator.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building cache keys or generating proxies.
#[derive(Error, Debug)]
pub enum ProxyError {
	/// A method target that neither the base type nor any interface declares.
	#[error("{member} is not declared on {scope}")]
	MissingMember { member: String, scope: String },
	/// The generator failed. Nothing is cached; the next request retries.
	#[error("proxy generation failed for {key}")]
	Generation {
		key: CacheKey,
		#[source]
		source: GeneratorError,
	},
	#[error(transparent)]
	Catalog(#[from] CatalogError),
}
