//! Proxy generation cache.
//!
//! Generating a proxy type is expensive, so each distinct request is
//! generated at most once per process. A request is identified by a
//! [`CacheKey`]: the target (one method or a whole type), an optional base
//! type, the ordered list of extra interfaces, and [`GenerationOptions`].
//!
//! ```rust,ignore
//! let key = CacheKey::for_type(ifoo, [idisposable], None);
//! let proxy = ProxyCache::global().get_or_create(&key, |key| generator.build(key))?;
//! ```
//!
//! The generator itself lives outside this crate; [`ProxyCache`] only calls
//! it.

mod cache;
mod error;
mod key;
mod request;

pub use cache::{ArtifactHandle, ProxyCache};
pub use error::{GeneratorError, ProxyError};
pub use key::{CacheKey, GenerationOptions, Target};
pub use request::ProxyRequest;
