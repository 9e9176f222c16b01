use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::{ Arc, Mutex, Once };
use std::task::{ Context, Poll };
use futures::channel::oneshot;
use lazy_static::lazy_static;
use element_toolkit::console::{ Severity, set_printer };
use crate::{ Content, ContentFailure, ContentRoutine, ElementConfig, InstanceController, Registry, content_routine };
use crate::test::integrations::testbackend::{ TestBackend, TestFragment };
use crate::test::integrations::testcommander::TestCommander;

lazy_static! {
    static ref LOGGED : Arc<Mutex<Vec<(Severity,String)>>> = Arc::new(Mutex::new(vec![]));
}

static CAPTURE : Once = Once::new();

/* The console is process-wide and tests run in parallel, so everything is captured into one
 * list and tests look for their own messages in it.
 */
fn capture_console() {
    CAPTURE.call_once(|| {
        let logged = LOGGED.clone();
        set_printer(move |severity,message| {
            logged.lock().unwrap().push((*severity,message.to_string()));
        });
    });
}

pub(crate) struct TestHelpers {
    pub(crate) registry: Registry<TestBackend>,
    pub(crate) backend: TestBackend,
    pub(crate) commander: TestCommander
}

impl TestHelpers {
    pub(crate) fn new() -> TestHelpers {
        TestHelpers::with_config(&ElementConfig::new())
    }

    pub(crate) fn with_config(config: &ElementConfig) -> TestHelpers {
        capture_console();
        let backend = TestBackend::new();
        let commander = TestCommander::new();
        let registry = Registry::new(backend.clone(),commander.clone(),config).expect("registry");
        TestHelpers { registry, backend, commander }
    }

    pub(crate) fn create(&self, name: &str) -> InstanceController<TestBackend> {
        self.backend.create(name).expect("element not defined")
    }

    pub(crate) fn tick(&self) { self.commander.tick(); }

    pub(crate) fn logged(&self) -> Vec<String> {
        LOGGED.lock().unwrap().iter().map(|x| x.1.clone()).collect()
    }

    pub(crate) fn logged_errors(&self) -> Vec<String> {
        LOGGED.lock().unwrap().iter().filter(|x| x.0 == Severity::Error).map(|x| x.1.clone()).collect()
    }
}

struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/* Suspends the calling task for one turn of the executor. */
pub(crate) fn yield_once() -> impl Future<Output=()> { YieldOnce(false) }

pub(crate) fn tick_routine(tag: &str, text: &str) -> ContentRoutine<TestBackend> {
    let (tag,text) = (tag.to_string(),text.to_string());
    content_routine(move || {
        let (tag,text) = (tag.clone(),text.clone());
        async move {
            yield_once().await;
            Ok(Content::new(TestFragment::one(&tag,&text)))
        }
    })
}

pub(crate) fn failing_routine(message: &str) -> ContentRoutine<TestBackend> {
    let message = message.to_string();
    content_routine(move || {
        let message = message.clone();
        async move {
            yield_once().await;
            Err(ContentFailure::new(&message))
        }
    })
}

pub(crate) type Gates = Rc<Mutex<Vec<oneshot::Sender<Result<String,String>>>>>;

/* Each invocation parks until the test sends through the gate it left behind. Ok(text) becomes
 * a <p> whose mount bumps the returned counter, Err(message) a plain failure.
 */
pub(crate) fn gated_routine() -> (ContentRoutine<TestBackend>,Gates,Rc<Mutex<u32>>) {
    let gates : Gates = Rc::new(Mutex::new(vec![]));
    let mounts = Rc::new(Mutex::new(0));
    let gates2 = gates.clone();
    let mounts2 = mounts.clone();
    let routine = content_routine(move || {
        let (sender,receiver) = oneshot::channel();
        gates2.lock().unwrap().push(sender);
        let mounts = mounts2.clone();
        async move {
            match receiver.await {
                Ok(Ok(text)) => {
                    Ok(Content::new(TestFragment::one("p",&text)).with_mount(move |_| {
                        *mounts.lock().unwrap() += 1;
                    }))
                },
                Ok(Err(message)) => Err(ContentFailure::new(&message)),
                Err(_) => Err(ContentFailure::new("gate dropped"))
            }
        }
    });
    (routine,gates,mounts)
}
