//! Identity resolution shared by every user-keyed operation.

mod resolve_user;

pub use resolve_user::{ResolveError, ResolveUser};
