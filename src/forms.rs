//! The form engine.
//!
//! # Examples
//!
//! ```
//! use vuf::forms::{Form, FormDefinition, field};
//!
//! let form = Form::new(FormDefinition::new().field("name", field("Taro")));
//! assert_eq!(form.get_json()["name"], "Taro");
//! ```

pub use vuf_forms::*;
