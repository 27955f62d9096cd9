use std::future::Future;

/// Runs a `!Send` future on the browser event loop. The host version blocks
/// inline, which lets timer-driven effects complete synchronously in tests;
/// it must not be called from within another executor.
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    futures::executor::block_on(future);
}
