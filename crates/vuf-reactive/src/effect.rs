//! Effect - Reactive Side Effects
//!
//! An `Effect` runs its closure immediately and re-runs it synchronously whenever a
//! signal read during the previous run changes. Dependencies are re-collected on
//! every run.
//!
//! ## Example
//!
//! ```
//! use vuf_reactive::{Effect, Signal};
//!
//! let count = Signal::new(0);
//! let doubled = Signal::new(0);
//!
//! let (source, target) = (count.clone(), doubled.clone());
//! let _effect = Effect::new(move || target.set(source.get() * 2));
//!
//! count.set(5);
//! assert_eq!(doubled.get_untracked(), 10);
//! ```
//!
//! ## Re-entrancy
//!
//! An effect is never re-entered. If a running effect causes a change that would
//! re-run itself, that notification is dropped.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

type EffectFn = Rc<RefCell<Box<dyn FnMut() + 'static>>>;

thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = const { RefCell::new(BTreeMap::new()) };
}

/// A reactive effect that re-runs when its dependencies change
///
/// Dropping the effect unsubscribes it.
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Create an effect and run it once
	pub fn new<F>(mut f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let disposed_clone = Rc::clone(&disposed);
		let effect_fn: EffectFn = Rc::new(RefCell::new(Box::new(move || {
			if !disposed_clone.get() {
				f();
			}
		})));
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(id, effect_fn);
		});

		Self::execute_effect(id);

		Self { id, disposed }
	}

	/// Execute an effect by its ID
	///
	/// Called by the runtime when a dependency changes.
	pub(crate) fn execute_effect(effect_id: NodeId) {
		let Some(effect_fn) =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow().get(&effect_id).cloned())
		else {
			return;
		};
		let Ok(mut run) = effect_fn.try_borrow_mut() else {
			tracing::debug!("Effect {:?} is already running; change notification dropped", effect_id);
			return;
		};

		with_runtime(|rt| {
			rt.clear_dependencies(effect_id);
			rt.push_observer(Observer {
				id: effect_id,
				node_type: NodeType::Effect,
			});
		});

		(*run)();

		with_runtime(|rt| {
			rt.pop_observer();
		});

		// Disposed while running: drop the dependencies this run recorded
		let still_registered =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow().contains_key(&effect_id));
		if !still_registered {
			with_runtime(|rt| rt.remove_node(effect_id));
		}
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stop the effect and remove it from the runtime
	pub fn dispose(&self) {
		self.disposed.set(true);

		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		// Dropped outside the borrow: the closure may own effects of its own
		let removed = EFFECT_FUNCTIONS.try_with(|storage| storage.borrow_mut().remove(&self.id));
		drop(removed);
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}
