//! Mock objects: setup registration and invocation resolution.
//!
//! A [`Mock`] stands in for one class or interface of a
//! [`TypeCatalog`](decoy_primitives::TypeCatalog). Setups bind a
//! per-parameter matcher list to a [`Response`] for one member; each call is
//! turned into an [`Invocation`] and resolved against the mock's
//! [`SetupRegistry`].
//!
//! # Resolution
//!
//! 1. Name-based calls are bound to one overload first ([`overload::bind`]).
//! 2. Setups for that exact member are scanned newest first.
//! 3. The first setup whose matchers all accept the arguments wins.
//! 4. With no match, [`Behavior::Strict`] fails with [`Reason::NoSetup`] and
//!    [`Behavior::Loose`] returns the default value of the return type.

mod behavior;
mod error;
mod invocation;
mod mock;
pub mod overload;
mod registry;
mod resolver;
mod setup;

pub use behavior::{Behavior, DefaultValue, MockSettings};
pub use error::{MockError, Reason};
pub use invocation::Invocation;
pub use mock::Mock;
pub use registry::SetupRegistry;
pub use resolver::{Resolution, resolve};
pub use setup::{Response, Setup};
