//! Reactive Runtime
//!
//! Manages the dependency graph between signals and the effects that read them.
//!
//! ## Architecture
//!
//! 1. **Observer Stack**: Tracks the effect currently executing
//! 2. **Dependency Tracking**: `Signal::get()` records an edge from the signal to the
//!    observer on top of the stack
//! 3. **Synchronous Propagation**: `Signal::set()` re-runs every subscribed effect
//!    before returning
//!
//! The runtime is thread-local. Signals and effects created on one thread never
//! observe each other across threads.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for reactive nodes (Signals and Effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Type of reactive node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// A Signal node (source of reactivity)
	Signal,
	/// An Effect node (side effect that runs when dependencies change)
	Effect,
}

/// Observer represents a currently executing Effect
#[derive(Debug, Clone)]
pub struct Observer {
	pub id: NodeId,
	pub node_type: NodeType,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// IDs of nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// IDs of nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

/// Per-thread reactive runtime
pub struct Runtime {
	observer_stack: RefCell<Vec<Observer>>,
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
}

impl Runtime {
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
		}
	}

	/// Get the current observer (the currently executing Effect)
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack
			.borrow()
			.last()
			.map(|observer| observer.id)
	}

	pub fn push_observer(&self, observer: Observer) {
		self.observer_stack.borrow_mut().push(observer);
	}

	pub fn pop_observer(&self) -> Option<Observer> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Record that the current observer depends on `signal_id`
	///
	/// No-op when no effect is executing.
	pub fn track_dependency(&self, signal_id: NodeId) {
		if let Some(observer_id) = self.current_observer() {
			let mut graph = self.dependency_graph.borrow_mut();

			let signal_node = graph.entry(signal_id).or_default();
			if !signal_node.subscribers.contains(&observer_id) {
				signal_node.subscribers.push(observer_id);
			}

			let observer_node = graph.entry(observer_id).or_default();
			if !observer_node.dependencies.contains(&signal_id) {
				observer_node.dependencies.push(signal_id);
			}
		}
	}

	/// Re-run every effect subscribed to `signal_id`
	///
	/// Subscribers are snapshotted first, so effects that subscribe during
	/// propagation wait for the next change.
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let subscribers = self
			.dependency_graph
			.borrow()
			.get(&signal_id)
			.map(|node| node.subscribers.clone())
			.unwrap_or_default();

		for effect_id in subscribers {
			crate::effect::Effect::execute_effect(effect_id);
		}
	}

	/// Clear dependencies for a node
	///
	/// Called before an effect re-runs so it only stays subscribed to what it reads this time.
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => std::mem::take(&mut node.dependencies),
			None => return,
		};

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Remove a node from the dependency graph
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		let mut graph = self.dependency_graph.borrow_mut();
		if let Some(node) = graph.remove(&node_id) {
			for subscriber in node.subscribers {
				if let Some(sub_node) = graph.get_mut(&subscriber) {
					sub_node.dependencies.retain(|&id| id != node_id);
				}
			}
		}
	}

	/// Check if a node exists in the dependency graph (for testing)
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node (for testing)
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Run `f` against the current thread's runtime
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but returns `None` once thread-local storage is torn down
///
/// Used from `Drop` implementations.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

/// Run `f` with dependency tracking suspended
///
/// Signals read inside `f` do not become dependencies of the running effect.
pub fn untrack<F, R>(f: F) -> R
where
	F: FnOnce() -> R,
{
	let saved = with_runtime(|rt| std::mem::take(&mut *rt.observer_stack.borrow_mut()));
	let result = f();
	with_runtime(|rt| {
		let mut stack = rt.observer_stack.borrow_mut();
		let nested = std::mem::replace(&mut *stack, saved);
		stack.extend(nested);
	});
	result
}
