use crate::ConditionalSend;
use std::future::Future;
use thiserror::Error;

/// Errors from scheduling background work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyfobAsyncError {
    /// There is no executor to hand the future to.
    #[error("No async runtime available to spawn onto")]
    NoRuntime,
}

/// Hand a future to the local executor and return without waiting for it.
///
/// The future is polled to completion in the background; its output is
/// discarded. On native targets this requires a running Tokio runtime and
/// fails with [`KeyfobAsyncError::NoRuntime`] otherwise. On
/// `wasm32-unknown-unknown` the future is queued on the browser's microtask
/// loop and scheduling never fails.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F) -> Result<(), KeyfobAsyncError>
where
    F: Future<Output = ()> + ConditionalSend + 'static,
{
    let handle =
        tokio::runtime::Handle::try_current().map_err(|_| KeyfobAsyncError::NoRuntime)?;
    handle.spawn(future);
    Ok(())
}

/// Hand a future to the local executor and return without waiting for it.
///
/// The future is polled to completion in the background; its output is
/// discarded. On native targets this requires a running Tokio runtime and
/// fails with [`KeyfobAsyncError::NoRuntime`] otherwise. On
/// `wasm32-unknown-unknown` the future is queued on the browser's microtask
/// loop and scheduling never fails.
#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F) -> Result<(), KeyfobAsyncError>
where
    F: Future<Output = ()> + ConditionalSend + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
    async fn it_runs_spawned_work_to_completion() {
        let (tx, rx) = oneshot::channel();

        spawn(async move {
            let _ = tx.send(42);
        })
        .unwrap();

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn it_reports_a_missing_runtime() {
        let result = spawn(async {});
        assert_eq!(result, Err(KeyfobAsyncError::NoRuntime));
    }
}
