use std::rc::Rc;
use crate::component::content::ContentRoutine;
use crate::host::backend::Backend;

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct AttributeChange {
    pub name: String,
    pub previous: Option<String>,
    pub next: Option<String>
}

/// Called for changes to observed attributes, with the boundary if the instance has one yet.
pub type AttributeObserver<B> = Rc<dyn Fn(&AttributeChange,Option<&<B as Backend>::Boundary>)>;

/// Everything bound to an element name by `Registry::define_with`. Immutable once defined.
pub struct Definition<B: Backend> {
    name: String,
    routine: ContentRoutine<B>,
    observed: Vec<String>,
    observer: Option<AttributeObserver<B>>
}

impl<B: Backend> Definition<B> {
    pub fn new(name: &str, routine: ContentRoutine<B>) -> Definition<B> {
        Definition {
            name: name.to_string(),
            routine,
            observed: vec![],
            observer: None
        }
    }

    pub fn observe<F>(mut self, attributes: &[&str], observer: F) -> Definition<B>
            where F: Fn(&AttributeChange,Option<&B::Boundary>) + 'static {
        self.observed = attributes.iter().map(|x| x.to_string()).collect();
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn observed(&self) -> &[String] { &self.observed }
    pub fn is_observed(&self, attribute: &str) -> bool { self.observed.iter().any(|x| x == attribute) }

    pub(crate) fn routine(&self) -> &ContentRoutine<B> { &self.routine }
    pub(crate) fn observer(&self) -> Option<&AttributeObserver<B>> { self.observer.as_ref() }
}
