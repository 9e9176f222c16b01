use std::future::Future;
use std::pin::Pin;
use element_core::Commander;
use element_toolkit::log_extra;

/* The browser's microtask queue is the executor. */
#[derive(Clone)]
pub struct WebCommander;

impl Commander for WebCommander {
    fn add_task(&self, name: &str, task: Pin<Box<dyn Future<Output=()> + 'static>>) {
        log_extra!("task {} started",name);
        wasm_bindgen_futures::spawn_local(task);
    }
}
