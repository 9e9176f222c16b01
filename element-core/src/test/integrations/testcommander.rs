use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Mutex;
use futures::executor::{ LocalPool, LocalSpawner };
use futures::task::LocalSpawnExt;
use element_toolkit::lock;
use crate::Commander;

/* Tasks only run when the test calls tick(), which polls until nothing can make progress. */
#[derive(Clone)]
pub struct TestCommander {
    pool: Rc<Mutex<LocalPool>>,
    spawner: LocalSpawner,
    names: Rc<Mutex<Vec<String>>>
}

impl TestCommander {
    pub(crate) fn new() -> TestCommander {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        TestCommander {
            pool: Rc::new(Mutex::new(pool)),
            spawner,
            names: Rc::new(Mutex::new(vec![]))
        }
    }

    pub(crate) fn tick(&self) {
        lock!(self.pool).run_until_stalled();
    }

    pub(crate) fn task_names(&self) -> Vec<String> { lock!(self.names).clone() }
}

impl Commander for TestCommander {
    fn add_task(&self, name: &str, task: Pin<Box<dyn Future<Output=()> + 'static>>) {
        lock!(self.names).push(name.to_string());
        self.spawner.spawn_local(task).expect("test pool shut down");
    }
}
