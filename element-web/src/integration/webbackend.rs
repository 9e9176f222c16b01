use js_sys::{ Array, Function };
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ Document, DocumentFragment, HtmlElement, HtmlTemplateElement, Node, ShadowRoot, ShadowRootInit };
use element_core::{ Backend, InstanceFactory, LifecycleHooks };
use element_toolkit::error::Error;
use crate::integration::js;
use crate::run::config::ShadowMode;
use crate::util::error::{ confused_browser, confused_browser_option, js_message };

/// What the javascript side of a registered element holds on to. Each lifecycle callback the
/// browser makes on the element is forwarded here.
///
/// Nothing reachable from the handle keeps the element alive, so when the page lets go of the
/// element both are collected. With `wasm-bindgen --weak-refs` that also frees the Rust side.
#[wasm_bindgen]
pub struct LifecycleHandle {
    hooks: Box<dyn LifecycleHooks>
}

#[wasm_bindgen]
impl LifecycleHandle {
    pub fn connected(&self) { self.hooks.on_connect(); }
    pub fn disconnected(&self) { self.hooks.on_disconnect(); }
    pub fn adopted(&self) { self.hooks.on_adopt(); }

    pub fn attribute_changed(&self, name: &str, previous: Option<String>, next: Option<String>) {
        self.hooks.on_attribute_change(name,previous.as_deref(),next.as_deref());
    }
}

/// An element as the controller sees it. The browser owns the element, so this only points at it.
#[derive(Clone)]
pub struct WebElement(js::WeakRef);

impl WebElement {
    fn new(element: &HtmlElement) -> WebElement { WebElement(js::WeakRef::new(element)) }

    pub fn element(&self) -> Option<HtmlElement> { self.0.target().dyn_into().ok() }
}

/// The shadow root content lives in. Weak like `WebElement`: the element keeps its own root.
#[derive(Clone)]
pub struct WebBoundary(js::WeakRef);

impl WebBoundary {
    pub fn root(&self) -> Option<ShadowRoot> { self.0.target().dyn_into().ok() }

    fn live_root(&self) -> Result<ShadowRoot,Error> {
        self.root().ok_or_else(|| Error::host("shadow root has been collected"))
    }
}

/* HTML text to detached markup, without running any script in it. */
pub(crate) fn html_fragment(document: &Document, html: &str) -> Result<DocumentFragment,Error> {
    let template = confused_browser(document.create_element("template"),"cannot create template")?;
    let template = confused_browser(template.dyn_into::<HtmlTemplateElement>().map_err(|e| e.into()),"template is not a template")?;
    template.set_inner_html(html);
    Ok(template.content())
}

/* Accepts the shapes javascript content routines produce: a fragment, a parsed document, any
 * other node, or an HTML string.
 */
pub(crate) fn to_fragment(document: &Document, value: JsValue) -> Result<DocumentFragment,Error> {
    if let Some(html) = value.as_string() {
        return html_fragment(document,&html);
    }
    let value = match value.dyn_into::<DocumentFragment>() {
        Ok(fragment) => { return Ok(fragment); },
        Err(value) => value
    };
    let fragment = document.create_document_fragment();
    if let Some(parsed) = value.dyn_ref::<Document>() {
        let root = confused_browser_option(parsed.document_element(),"parsed document has no root")?;
        confused_browser(fragment.append_child(&root),"cannot take parsed document")?;
    } else if let Some(node) = value.dyn_ref::<Node>() {
        confused_browser(fragment.append_child(node),"cannot take node")?;
    } else {
        return Err(Error::host(&format!("content is not markup: {}",js_message(&value))));
    }
    Ok(fragment)
}

pub struct WebBackend {
    document: Document,
    shadow_mode: ShadowMode
}

impl WebBackend {
    pub fn new(shadow_mode: ShadowMode) -> Result<WebBackend,Error> {
        let window = confused_browser_option(web_sys::window(),"cannot get window")?;
        let document = confused_browser_option(window.document(),"cannot get document")?;
        Ok(WebBackend { document, shadow_mode })
    }

    pub fn document(&self) -> &Document { &self.document }
}

impl Backend for WebBackend {
    type Element = WebElement;
    type Boundary = WebBoundary;
    type Fragment = DocumentFragment;

    fn register(&self, name: &str, observed: &[String], factory: InstanceFactory<WebBackend>) -> Result<(),Error> {
        let window = confused_browser_option(web_sys::window(),"cannot get window")?;
        let elements = window.custom_elements();
        if !elements.get(name).is_undefined() {
            return Err(Error::duplicate(&format!("<{}> is already defined in this document",name)));
        }
        let observed = observed.iter().map(|x| JsValue::from_str(x)).collect::<Array>();
        let create = Closure::wrap(Box::new(move |element: HtmlElement| {
            JsValue::from(LifecycleHandle { hooks: Box::new(factory(WebElement::new(&element))) })
        }) as Box<dyn Fn(HtmlElement) -> JsValue>);
        /* definitions are never withdrawn so the closure lives as long as the page */
        let create : Function = create.into_js_value().unchecked_into();
        confused_browser(js::define(name,&observed,&create),&format!("cannot define <{}>",name))
    }

    fn attach_boundary(&self, element: &WebElement) -> Result<WebBoundary,Error> {
        let element = element.element().ok_or_else(|| Error::host("element has been collected"))?;
        let init = ShadowRootInit::new(self.shadow_mode.to_web());
        let root = confused_browser(element.attach_shadow(&init),"cannot attach shadow root")?;
        Ok(WebBoundary(js::WeakRef::new(&root)))
    }

    fn append_fragment(&self, boundary: &WebBoundary, fragment: DocumentFragment) -> Result<(),Error> {
        let root = boundary.live_root()?;
        confused_browser(root.append_child(&fragment),"cannot append content").map(|_| ())
    }

    fn clear_boundary(&self, boundary: &WebBoundary) -> Result<(),Error> {
        let root = boundary.live_root()?;
        while let Some(child) = root.first_child() {
            confused_browser(root.remove_child(&child),"cannot clear shadow root")?;
        }
        Ok(())
    }

    fn error_fragment(&self, name: &str, message: &str) -> Result<DocumentFragment,Error> {
        let fragment = self.document.create_document_fragment();
        let alert = confused_browser(self.document.create_element("div"),"cannot create error")?;
        confused_browser(alert.set_attribute("role","alert"),"cannot mark error")?;
        confused_browser(alert.set_attribute("class","element-error"),"cannot mark error")?;
        alert.set_text_content(Some(&format!("<{}> failed: {}",name,message)));
        confused_browser(fragment.append_child(&alert),"cannot build error")?;
        Ok(fragment)
    }
}
