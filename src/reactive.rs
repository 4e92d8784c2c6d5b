//! Signal/Effect runtime.
//!
//! # Examples
//!
//! ```
//! use vuf::reactive::{Effect, Signal};
//!
//! let count = Signal::new(1);
//! let doubled = Signal::new(0);
//! let (source, target) = (count.clone(), doubled.clone());
//! let _effect = Effect::new(move || target.set(source.get() * 2));
//!
//! count.set(21);
//! assert_eq!(doubled.get_untracked(), 42);
//! ```

pub use vuf_reactive::*;
