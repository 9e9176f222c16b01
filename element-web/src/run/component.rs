use std::fmt::Display;
use std::rc::Rc;
use futures::future::LocalBoxFuture;
use web_sys::{ Document, ShadowRoot };
use element_core::{ Content, ContentFailure, ContentResult };
use element_toolkit::error::Error;
use element_toolkit::log_extra;
use crate::integration::webbackend::{ WebBackend, WebBoundary, html_fragment };
use crate::run::api::ElementRegistry;

/// A custom element implemented in Rust.
///
/// `initialize` runs once per connection of each occurrence. The `Display` output of what it
/// returns becomes the element's content, and `connected` is then called with the shadow root
/// that content now lives in.
pub trait Component : Display + Sized + 'static {
    fn name() -> &'static str;

    fn initialize() -> LocalBoxFuture<'static,anyhow::Result<Self>>;

    /// Markup to show in place of the generic error state when `initialize` fails.
    fn failure_html(_error: &anyhow::Error) -> Option<String> { None }

    fn connected(self: &Rc<Self>, _root: ShadowRoot) {}

    fn define(elements: &ElementRegistry) -> Result<(),Error> {
        elements.define_component::<Self>()
    }
}

fn failure<C: Component>(document: &Document, error: anyhow::Error) -> ContentFailure<WebBackend> {
    let out = ContentFailure::new(&format!("{:#}",error));
    match C::failure_html(&error).map(|html| html_fragment(document,&html)) {
        Some(Ok(fragment)) => out.with_fragment(fragment),
        Some(Err(e)) => {
            e.report();
            out
        },
        None => out
    }
}

pub(crate) async fn component_content<C: Component>(document: Document) -> ContentResult<WebBackend> {
    let component = match C::initialize().await {
        Ok(component) => component,
        Err(e) => { return Err(failure::<C>(&document,e)); }
    };
    let root = html_fragment(&document,&component.to_string()).map_err(|e| {
        ContentFailure::new(&e.to_string())
    })?;
    let component = Rc::new(component);
    Ok(Content::new(root).with_mount(move |boundary: &WebBoundary| {
        match boundary.root() {
            Some(root) => { component.connected(root); },
            None => { log_extra!("<{}> collected before mount",C::name()); }
        }
    }))
}
