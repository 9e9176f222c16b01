mod integration {
    pub(crate) mod js;
    pub(crate) mod webbackend;
    pub(crate) mod webcommander;
    pub(crate) mod webconsole;
}

mod run {
    pub(crate) mod api;
    pub(crate) mod component;
    pub(crate) mod config;
}

mod util {
    pub(crate) mod error;
}

pub use crate::integration::webbackend::{ LifecycleHandle, WebBackend, WebBoundary, WebElement };
pub use crate::integration::webcommander::WebCommander;
pub use crate::integration::webconsole::WebConsole;
pub use crate::run::api::{ ElementRegistry, initialize_console };
pub use crate::run::component::Component;
pub use crate::run::config::{ ShadowMode, WebConfig };
pub use element_core::{ Error, ErrorType, LifecycleState };
