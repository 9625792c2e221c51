//! Once-only readiness gates for vector collections.
//!
//! Every store pointed at the same collection shares one gate, so concurrent first calls run the
//! existence check and creation exactly once. A failed initialization leaves the gate open and the
//! next caller retries.

use std::{
	collections::HashMap,
	sync::{Arc, LazyLock, Mutex},
};

use tokio::sync::OnceCell;

pub type ReadyGate = Arc<OnceCell<()>>;

static READY_GATES: LazyLock<Mutex<HashMap<String, ReadyGate>>> = LazyLock::new(Default::default);

pub fn ready_gate(endpoint: &str, collection: &str) -> ReadyGate {
	let key = format!("{endpoint}#{collection}");
	let mut gates = READY_GATES.lock().unwrap_or_else(|err| err.into_inner());

	gates.entry(key).or_default().clone()
}

#[cfg(test)]
mod tests {
	use std::{
		sync::atomic::{AtomicUsize, Ordering},
		time::Duration,
	};

	use super::*;

	#[test]
	fn same_collection_shares_a_gate() {
		let a = ready_gate("http://gate-test:6334", "shared");
		let b = ready_gate("http://gate-test:6334", "shared");
		let c = ready_gate("http://gate-test:6334", "other");

		assert!(Arc::ptr_eq(&a, &b));
		assert!(!Arc::ptr_eq(&a, &c));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_first_calls_initialize_once() {
		let gate = ready_gate("http://gate-test:6334", "concurrent");
		let calls = Arc::new(AtomicUsize::new(0));
		let mut tasks = Vec::new();

		for _ in 0..16 {
			let gate = gate.clone();
			let calls = calls.clone();

			tasks.push(tokio::spawn(async move {
				gate.get_or_try_init(|| async {
					calls.fetch_add(1, Ordering::SeqCst);
					tokio::time::sleep(Duration::from_millis(20)).await;

					Ok::<(), String>(())
				})
				.await
				.map(|_| ())
			}));
		}
		for task in tasks {
			task.await.expect("Gate task panicked.").expect("Gate init failed.");
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn failed_initialization_is_retried() {
		let gate = ready_gate("http://gate-test:6334", "retry");
		let first = gate.get_or_try_init(|| async { Err::<(), _>("unreachable") }).await;

		assert!(first.is_err());
		assert!(!gate.initialized());

		let second = gate.get_or_try_init(|| async { Ok::<(), &str>(()) }).await;

		assert!(second.is_ok());
		assert!(gate.initialized());
	}
}
