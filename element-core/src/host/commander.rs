use std::future::Future;
use std::pin::Pin;

/* Everything runs on the one rendering thread. A Commander only decides when a task gets polled,
 * never where. In the browser that is the microtask queue, in tests a LocalPool stepped by hand.
 */
pub trait Commander {
    fn add_task(&self, name: &str, task: Pin<Box<dyn Future<Output=()> + 'static>>);
}
