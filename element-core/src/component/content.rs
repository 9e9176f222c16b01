use std::future::Future;
use std::rc::Rc;
use futures::future::{ FutureExt, LocalBoxFuture };
use crate::host::backend::Backend;

type MountCallback<B> = Box<dyn FnOnce(&<B as Backend>::Boundary)>;

/// Successful output of a content routine: markup to attach plus an optional callback to wire up
/// behaviour once that markup is inside the isolation boundary.
pub struct Content<B: Backend> {
    root: B::Fragment,
    mount: Option<MountCallback<B>>
}

impl<B: Backend> Content<B> {
    pub fn new(root: B::Fragment) -> Content<B> {
        Content { root, mount: None }
    }

    pub fn with_mount<F>(mut self, mount: F) -> Content<B> where F: FnOnce(&B::Boundary) + 'static {
        self.mount = Some(Box::new(mount));
        self
    }

    pub(crate) fn into_parts(self) -> (B::Fragment,Option<MountCallback<B>>) {
        (self.root,self.mount)
    }
}

/// Rejection from a content routine. May carry markup to show instead of the generic error state.
pub struct ContentFailure<B: Backend> {
    message: String,
    fragment: Option<B::Fragment>
}

impl<B: Backend> ContentFailure<B> {
    pub fn new(message: &str) -> ContentFailure<B> {
        ContentFailure { message: message.to_string(), fragment: None }
    }

    pub fn with_fragment(mut self, fragment: B::Fragment) -> ContentFailure<B> {
        self.fragment = Some(fragment);
        self
    }

    pub(crate) fn into_parts(self) -> (String,Option<B::Fragment>) {
        (self.message,self.fragment)
    }
}

pub type ContentResult<B> = Result<Content<B>,ContentFailure<B>>;

/// Produces the content of one instance. Called afresh for every connection attempt.
pub type ContentRoutine<B> = Rc<dyn Fn() -> LocalBoxFuture<'static,ContentResult<B>>>;

pub fn content_routine<B,F,R>(routine: F) -> ContentRoutine<B>
        where B: Backend, F: Fn() -> R + 'static, R: Future<Output=ContentResult<B>> + 'static {
    Rc::new(move || routine().boxed_local())
}
