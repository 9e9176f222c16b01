mod component {
    pub(crate) mod content;
    pub(crate) mod controller;
    pub(crate) mod definition;
    pub(crate) mod lifecycle;

    pub use self::content::{ Content, ContentFailure, ContentResult, ContentRoutine, content_routine };
    pub use self::controller::InstanceController;
    pub use self::definition::{ AttributeChange, AttributeObserver, Definition };
    pub use self::lifecycle::LifecycleState;
}

mod host {
    pub(crate) mod backend;
    pub(crate) mod commander;
    pub(crate) mod hooks;

    pub use self::backend::{ Backend, InstanceFactory };
    pub use self::commander::Commander;
    pub use self::hooks::LifecycleHooks;
}

mod registry {
    pub(crate) mod registry;

    pub use self::registry::Registry;
}

mod run {
    pub(crate) mod config;

    pub use self::config::{ ElementConfig, FailureDisplay, ReconnectPolicy };
}

#[cfg(test)]
mod test {
    pub(crate) mod helpers;
    pub(crate) mod integrations {
        pub(crate) mod testbackend;
        pub(crate) mod testcommander;
    }
}

pub use crate::component::{
    AttributeChange, AttributeObserver, Content, ContentFailure, ContentResult, ContentRoutine,
    Definition, InstanceController, LifecycleState, content_routine
};
pub use crate::host::{ Backend, Commander, InstanceFactory, LifecycleHooks };
pub use crate::registry::Registry;
pub use crate::run::{ ElementConfig, FailureDisplay, ReconnectPolicy };
pub use element_toolkit::error::{ Error, ErrorType };
