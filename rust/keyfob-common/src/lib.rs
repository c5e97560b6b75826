#![warn(missing_docs)]

//! Light weight helpers shared by the keyfob crates. They exist so that code
//! driving browser facilities can be written once and still be exercised on
//! native targets, where the same traits are implemented by test doubles.

mod sync;
pub use sync::*;

mod r#async;
pub use r#async::*;
