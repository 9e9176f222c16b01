use std::rc::Rc;
use std::sync::Mutex;
use hashbrown::HashMap;
use element_toolkit::{ lock, log };
use element_toolkit::console::set_verbosity;
use element_toolkit::error::Error;
use crate::component::content::ContentRoutine;
use crate::component::controller::{ InstanceContext, InstanceController };
use crate::component::definition::Definition;
use crate::host::backend::{ Backend, InstanceFactory };
use crate::host::commander::Commander;
use crate::run::config::ElementConfig;

/// Name to definition bindings for one rendering host.
///
/// Definitions are permanent: a name, once bound here or in the host, cannot be bound again.
pub struct Registry<B: Backend> {
    context: Rc<InstanceContext<B>>,
    definitions: Rc<Mutex<HashMap<String,Rc<Definition<B>>>>>
}

impl<B: Backend> Clone for Registry<B> {
    fn clone(&self) -> Self {
        Registry {
            context: self.context.clone(),
            definitions: self.definitions.clone()
        }
    }
}

impl<B: Backend> Registry<B> {
    pub fn new<C>(backend: B, commander: C, config: &ElementConfig) -> Result<Registry<B>,Error> where C: Commander + 'static {
        if let Some(verbosity) = config.verbosity_if_set()? {
            set_verbosity(verbosity);
        }
        Ok(Registry {
            context: Rc::new(InstanceContext {
                backend: Rc::new(backend),
                commander: Rc::new(commander),
                failure_display: config.failure_display()?,
                reconnect: config.reconnect()?
            }),
            definitions: Rc::new(Mutex::new(HashMap::new()))
        })
    }

    pub fn backend(&self) -> &B { &self.context.backend }

    /// Bind `name` to `routine`. Fails with `DuplicateRegistration` if the name is taken.
    pub fn define(&self, name: &str, routine: ContentRoutine<B>) -> Result<(),Error> {
        self.define_with(Definition::new(name,routine))
    }

    pub fn define_with(&self, definition: Definition<B>) -> Result<(),Error> {
        let name = definition.name().to_string();
        if lock!(self.definitions).contains_key(&name) {
            return Err(Error::duplicate(&format!("<{}> is already defined",name)));
        }
        let definition = Rc::new(definition);
        let context = self.context.clone();
        let factory_definition = definition.clone();
        let factory : InstanceFactory<B> = Rc::new(move |element| {
            InstanceController::new(&factory_definition,&context,element)
        });
        /* host may construct upgraded elements synchronously inside register */
        self.context.backend.register(&name,definition.observed(),factory)?;
        lock!(self.definitions).insert(name.clone(),definition);
        log!("defined <{}>",name);
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        lock!(self.definitions).contains_key(name)
    }

    pub fn definition(&self, name: &str) -> Option<Rc<Definition<B>>> {
        lock!(self.definitions).get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut out : Vec<_> = lock!(self.definitions).keys().cloned().collect();
        out.sort();
        out
    }
}
