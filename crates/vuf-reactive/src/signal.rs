//! Signal - Fine-grained Reactive Primitive
//!
//! `Signal<T>` holds a value and records a dependency whenever it is read from
//! inside an [`Effect`](crate::Effect).
//!
//! ## Example
//!
//! ```
//! use vuf_reactive::Signal;
//!
//! let count = Signal::new(0);
//! assert_eq!(count.get(), 0);
//!
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive signal that holds a value and tracks dependencies
///
/// Clones share the value through `Rc<RefCell<T>>` and keep the same node id.
#[derive(Clone)]
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Get the current value, tracking the read when called from inside an effect
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Get the current value without tracking dependencies
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Set the signal to a new value and re-run dependent effects
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Modify the value in place, notifying dependents once
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		// Last clone: nothing can notify through this node anymore
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &self.get_untracked())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::runtime::{NodeType, Observer};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_signal_set_and_update() {
		let signal = Signal::new(0);
		signal.set(100);
		assert_eq!(signal.get_untracked(), 100);

		signal.update(|n| *n *= 2);
		assert_eq!(signal.get_untracked(), 200);
	}

	#[test]
	#[serial]
	fn test_signal_clone_shares_value_and_id() {
		let signal1 = Signal::new(String::from("a"));
		let signal2 = signal1.clone();

		signal1.set(String::from("b"));
		assert_eq!(signal2.get_untracked(), "b");
		assert_eq!(signal1.id(), signal2.id());
	}

	#[test]
	#[serial]
	fn test_signal_dependency_tracking() {
		let signal = Signal::new(42);
		assert_eq!(signal.get(), 42);

		with_runtime(|rt| {
			let observer_id = NodeId::new();
			rt.push_observer(Observer {
				id: observer_id,
				node_type: NodeType::Effect,
			});
			let _ = signal.get();
			rt.pop_observer();

			let graph = rt.dependency_graph.borrow();
			assert!(graph[&signal.id()].subscribers.contains(&observer_id));
		});
	}

	#[test]
	#[serial]
	fn test_last_clone_drop_removes_node() {
		let signal = Signal::new(1);
		let clone = signal.clone();
		let id = signal.id();

		with_runtime(|rt| {
			rt.push_observer(Observer {
				id: NodeId::new(),
				node_type: NodeType::Effect,
			});
		});
		let _ = signal.get();
		with_runtime(|rt| rt.pop_observer());

		drop(signal);
		assert!(with_runtime(|rt| rt.has_node(id)));
		drop(clone);
		assert!(!with_runtime(|rt| rt.has_node(id)));
	}
}
