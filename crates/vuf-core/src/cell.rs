//! Reactive-cell abstraction
//!
//! The form engine stores every field value in a cell created by a
//! [`Reactivity`] implementation and subscribes to cells through
//! [`Reactivity::effect`]. Host reactivity systems plug in by implementing
//! these two traits. [`PlainReactivity`] is the adapter with no reactivity
//! at all: cells are shared `RefCell`s and effects run exactly once.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A get/set pair over an observable value.
pub trait ReactiveCell<T: Clone + 'static>: Clone + 'static {
	/// Current value. Reactive implementations record the read as a dependency
	/// of the running effect.
	fn get(&self) -> T;

	/// Current value without recording a dependency.
	fn get_untracked(&self) -> T {
		self.get()
	}

	/// Replace the value and notify subscribers.
	fn set(&self, value: T);
}

/// Capability to create cells and effects for one reactivity system.
pub trait Reactivity: Clone + Default + 'static {
	type Cell<T: Clone + 'static>: ReactiveCell<T>;

	/// Keeps an effect subscribed for as long as it is alive.
	type Watcher: 'static;

	fn cell<T: Clone + 'static>(&self, initial: T) -> Self::Cell<T>;

	/// Run `f` now and again whenever a cell it read changes.
	fn effect(&self, f: Box<dyn FnMut()>) -> Self::Watcher;
}

/// Reactivity for static use: values are stored, nothing is observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainReactivity;

/// Shared mutable slot used by [`PlainReactivity`].
pub struct PlainCell<T>(Rc<RefCell<T>>);

impl<T> Clone for PlainCell<T> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<T: fmt::Debug> fmt::Debug for PlainCell<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("PlainCell").field(&self.0.borrow()).finish()
	}
}

impl<T: Clone + 'static> ReactiveCell<T> for PlainCell<T> {
	fn get(&self) -> T {
		self.0.borrow().clone()
	}

	fn set(&self, value: T) {
		*self.0.borrow_mut() = value;
	}
}

impl Reactivity for PlainReactivity {
	type Cell<T: Clone + 'static> = PlainCell<T>;
	type Watcher = ();

	fn cell<T: Clone + 'static>(&self, initial: T) -> PlainCell<T> {
		PlainCell(Rc::new(RefCell::new(initial)))
	}

	fn effect(&self, mut f: Box<dyn FnMut()>) -> Self::Watcher {
		f();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn test_plain_cell_clones_share_value() {
		let cell = PlainReactivity.cell(1);
		let other = cell.clone();
		other.set(2);
		assert_eq!(cell.get(), 2);
		assert_eq!(cell.get_untracked(), 2);
	}

	#[test]
	fn test_plain_effect_runs_once() {
		let runs = Rc::new(Cell::new(0));
		let cell = PlainReactivity.cell("a".to_string());
		let observed = cell.clone();
		let counter = Rc::clone(&runs);
		PlainReactivity.effect(Box::new(move || {
			let _ = observed.get();
			counter.set(counter.get() + 1);
		}));
		cell.set("b".to_string());
		assert_eq!(runs.get(), 1);
	}
}
