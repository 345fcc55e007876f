//! Path normalization and sandboxed resolution.
//!
//! Every relative path the resolvers read from configuration or knowledge
//! documents passes through [`resolve`], which guarantees the result stays
//! under the supplied base directory.

mod error;
mod resolve;

pub use error::PathError;
pub use resolve::*;
