use js_sys::{ Array, Function, Promise, Reflect };
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ Document, Node };
use element_core::{ Content, ContentFailure, ContentResult, ElementConfig, Registry, content_routine };
use element_toolkit::error::Error;
use element_toolkit::{ error, log, log_extra };
use element_toolkit::console::{ Verbosity, has_printer, set_verbosity };
use crate::integration::webbackend::{ WebBackend, WebBoundary, to_fragment };
use crate::integration::webcommander::WebCommander;
use crate::integration::webconsole::WebConsole;
use crate::run::component::{ Component, component_content };
use crate::run::config::WebConfig;
use crate::util::error::{ confused_browser, js_message };

fn build_config(config_object: &JsValue) -> Result<Vec<(String,String)>,Error> {
    let mut out = vec![];
    if config_object.is_undefined() || config_object.is_null() {
        return Ok(out);
    }
    for key in confused_browser(Reflect::own_keys(config_object),"bad config object")?.iter() {
        let value = confused_browser(Reflect::get(config_object,&key),"bad config object")?;
        let key_str = key.as_string().ok_or_else(|| Error::config("config keys must be strings"))?;
        let value_str = value.as_string()
            .or_else(|| value.as_f64().map(|x| x.to_string()))
            .ok_or_else(|| Error::config(&format!("value for '{}' must be a string or number",key_str)))?;
        out.push((key_str,value_str));
    }
    Ok(out)
}

/* What a javascript routine hands back: [root, mount] or just root. */
fn js_content(document: &Document, value: JsValue) -> Result<Content<WebBackend>,Error> {
    let (root,mount) = match value.dyn_into::<Array>() {
        Ok(array) => (array.get(0),array.get(1).dyn_into::<Function>().ok()),
        Err(value) => (value,None)
    };
    let content = Content::new(to_fragment(document,root)?);
    Ok(match mount {
        Some(mount) => content.with_mount(move |boundary: &WebBoundary| {
            let root = match boundary.root() {
                Some(root) => root,
                None => { log_extra!("element collected before mount"); return; }
            };
            if let Err(e) = mount.call1(&JsValue::NULL,&root) {
                error!("mount callback failed: {}",js_message(&e));
            }
        }),
        None => content
    })
}

/* A rejection carrying a node is markup to show in the element, anything else is just an error. */
fn js_failure(document: &Document, value: JsValue) -> ContentFailure<WebBackend> {
    if value.is_instance_of::<Node>() {
        match to_fragment(document,value) {
            Ok(fragment) => ContentFailure::new("routine rejected with markup").with_fragment(fragment),
            Err(e) => ContentFailure::new(&e.to_string())
        }
    } else {
        ContentFailure::new(&js_message(&value))
    }
}

async fn js_routine_content(document: Document, routine: Function) -> ContentResult<WebBackend> {
    let promise = match routine.call0(&JsValue::NULL) {
        Ok(value) => Promise::resolve(&value),
        Err(e) => { return Err(js_failure(&document,e)); }
    };
    match JsFuture::from(promise).await {
        Ok(value) => js_content(&document,value).map_err(|e| ContentFailure::new(&e.to_string())),
        Err(e) => Err(js_failure(&document,e))
    }
}

/// Entry point for pages: owns the registry of elements defined through this module.
#[wasm_bindgen]
pub struct ElementRegistry {
    registry: Registry<WebBackend>,
    document: Document
}

impl ElementRegistry {
    pub fn registry(&self) -> &Registry<WebBackend> { &self.registry }

    pub fn define_component<C: Component>(&self) -> Result<(),Error> {
        let document = self.document.clone();
        self.registry.define(C::name(),content_routine(move || component_content::<C>(document.clone())))
    }

    fn build(config_object: &JsValue) -> Result<ElementRegistry,Error> {
        let mut config = ElementConfig::new();
        let mut web_config = WebConfig::new();
        for (key,value) in build_config(config_object)? {
            if web_config.is_key(&key) {
                web_config.set(&key,&value)?;
            } else {
                config.set(&key,&value)?;
            }
        }
        /* keep a console the page already installed unless told otherwise */
        if web_config.console_configured() || !has_printer() {
            let (max_per_interval,interval) = web_config.console_limits()?;
            WebConsole::new(max_per_interval,interval).install();
        }
        let backend = WebBackend::new(web_config.shadow_mode()?)?;
        let document = backend.document().clone();
        let registry = Registry::new(backend,WebCommander,&config)?;
        log!("element registry ready");
        Ok(ElementRegistry { registry, document })
    }
}

#[wasm_bindgen]
impl ElementRegistry {
    #[wasm_bindgen(constructor)]
    pub fn new(config_object: JsValue) -> Result<ElementRegistry,JsError> {
        Ok(ElementRegistry::build(&config_object)?)
    }

    /// `routine` is called for each connection and returns (a promise of) `[root, mount]`.
    pub fn define(&self, name: &str, routine: Function) -> Result<(),JsError> {
        let document = self.document.clone();
        let routine = content_routine(move || js_routine_content(document.clone(),routine.clone()));
        Ok(self.registry.define(name,routine)?)
    }

    pub fn defined(&self) -> Array {
        self.registry.names().iter().map(|x| JsValue::from_str(x)).collect()
    }
}

/* For pages which want logging before (or without) a registry. */
#[wasm_bindgen]
pub fn initialize_console(verbosity: &str) -> Result<(),JsError> {
    console_error_panic_hook::set_once();
    let verbosity = Verbosity::from_string(verbosity).ok_or_else(|| {
        Error::config(&format!("expected quiet, normal or noisy, not '{}'",verbosity))
    })?;
    let (max_per_interval,interval) = WebConfig::new().console_limits()?;
    WebConsole::new(max_per_interval,interval).install();
    set_verbosity(verbosity);
    Ok(())
}
