//! [`Reactivity`] implementation backed by [`Signal`] and [`Effect`]
//!
//! Forms built with [`SignalReactivity`] store each field in a signal, so a
//! watch registered through `validate_watch` re-validates a field as soon as
//! its value is set.

use crate::{Effect, Signal};
use vuf_core::cell::{ReactiveCell, Reactivity};

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalReactivity;

impl<T: Clone + 'static> ReactiveCell<T> for Signal<T> {
	fn get(&self) -> T {
		Signal::get(self)
	}

	fn get_untracked(&self) -> T {
		Signal::get_untracked(self)
	}

	fn set(&self, value: T) {
		Signal::set(self, value);
	}
}

impl Reactivity for SignalReactivity {
	type Cell<T: Clone + 'static> = Signal<T>;
	type Watcher = Effect;

	fn cell<T: Clone + 'static>(&self, initial: T) -> Signal<T> {
		Signal::new(initial)
	}

	fn effect(&self, mut f: Box<dyn FnMut()>) -> Effect {
		Effect::new(move || f())
	}
}
