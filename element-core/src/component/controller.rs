use std::rc::Rc;
use std::sync::Mutex;
use element_toolkit::{ lock, log_extra, warn_extra };
use element_toolkit::error::{ Error, err_report };
use crate::component::content::ContentResult;
use crate::component::definition::{ AttributeChange, Definition };
use crate::component::lifecycle::LifecycleState;
use crate::host::backend::Backend;
use crate::host::commander::Commander;
use crate::host::hooks::LifecycleHooks;
use crate::run::config::{ FailureDisplay, ReconnectPolicy };

/* Shared by every instance created through one registry. */
pub(crate) struct InstanceContext<B: Backend> {
    pub(crate) backend: Rc<B>,
    pub(crate) commander: Rc<dyn Commander>,
    pub(crate) failure_display: FailureDisplay,
    pub(crate) reconnect: ReconnectPolicy
}

struct InstanceState<B: Backend> {
    lifecycle: LifecycleState,
    /* bumped on every connection; results carry the epoch they were started under */
    epoch: u64,
    boundary: Option<B::Boundary>,
    rendered: bool,
    outcome: Option<LifecycleState>,
    adoptions: u64
}

struct InstanceInner<B: Backend> {
    definition: Rc<Definition<B>>,
    context: Rc<InstanceContext<B>>,
    element: B::Element,
    state: Mutex<InstanceState<B>>
}

/// Drives one occurrence of a defined element through its lifecycle.
///
/// Created by the host (via the registry's factory) when it constructs the element. The host then
/// reports insertions, removals, adoptions and attribute changes through `LifecycleHooks`.
/// Content is produced by the definition's routine on a `Commander` task and applied only if the
/// connection that asked for it is still current.
pub struct InstanceController<B: Backend>(Rc<InstanceInner<B>>);

// derive(Clone) would demand B: Clone
impl<B: Backend> Clone for InstanceController<B> {
    fn clone(&self) -> Self {
        InstanceController(self.0.clone())
    }
}

impl<B: Backend> InstanceController<B> {
    pub(crate) fn new(definition: &Rc<Definition<B>>, context: &Rc<InstanceContext<B>>, element: B::Element) -> InstanceController<B> {
        log_extra!("<{}> constructed",definition.name());
        InstanceController(Rc::new(InstanceInner {
            definition: definition.clone(),
            context: context.clone(),
            element,
            state: Mutex::new(InstanceState {
                lifecycle: LifecycleState::Unattached,
                epoch: 0,
                boundary: None,
                rendered: false,
                outcome: None,
                adoptions: 0
            })
        }))
    }

    pub fn name(&self) -> &str { self.0.definition.name() }
    pub fn element(&self) -> &B::Element { &self.0.element }
    pub fn state(&self) -> LifecycleState { lock!(self.0.state).lifecycle }
    pub fn boundary(&self) -> Option<B::Boundary> { lock!(self.0.state).boundary.clone() }
    pub fn adoptions(&self) -> u64 { lock!(self.0.state).adoptions }

    fn connect(&self) -> Result<(),Error> {
        let mut state = lock!(self.0.state);
        if state.lifecycle.is_live() {
            warn_extra!("<{}> connected while {}: ignored",self.name(),state.lifecycle);
            return Ok(());
        }
        state.lifecycle = LifecycleState::Connecting;
        state.epoch += 1;
        let epoch = state.epoch;
        if state.boundary.is_none() {
            match self.0.context.backend.attach_boundary(&self.0.element) {
                Ok(boundary) => { state.boundary = Some(boundary); },
                Err(e) => {
                    state.lifecycle = LifecycleState::Failed;
                    return Err(e);
                }
            }
        }
        if self.0.context.reconnect == ReconnectPolicy::Reuse {
            if let Some(outcome) = state.outcome {
                state.lifecycle = outcome;
                log_extra!("<{}> reconnected, keeping {} content",self.name(),outcome);
                return Ok(());
            }
        }
        drop(state);
        let pending = (self.0.definition.routine())();
        let instance = Rc::downgrade(&self.0);
        let name = self.name().to_string();
        self.0.context.commander.add_task(&format!("<{}> content",name),Box::pin(async move {
            let result = pending.await;
            match instance.upgrade() {
                Some(inner) => { err_report(InstanceController(inner).settle(epoch,result)); },
                None => { log_extra!("<{}> content arrived after instance was dropped",name); }
            }
        }));
        Ok(())
    }

    /* Runs on the commander task once the routine resolves. */
    fn settle(&self, epoch: u64, result: ContentResult<B>) -> Result<(),Error> {
        let boundary = {
            let state = lock!(self.0.state);
            if state.epoch != epoch || state.lifecycle != LifecycleState::Connecting {
                return Err(Error::stale(&format!("<{}> content for connection {} arrived while {} (connection {})",
                    self.name(),epoch,state.lifecycle,state.epoch)));
            }
            state.boundary.clone().ok_or_else(|| {
                Error::host(&format!("<{}> connecting without a boundary",self.name()))
            })?
        };
        match result {
            Ok(content) => {
                let (root,mount) = content.into_parts();
                if let Err(e) = self.replace_content(&boundary,vec![root]) {
                    return self.fail(epoch,&boundary,&e.to_string(),None);
                }
                if self.enter(epoch,LifecycleState::Connected) {
                    log_extra!("<{}> connected",self.name());
                    if let Some(mount) = mount {
                        mount(&boundary);
                    }
                }
                Ok(())
            },
            Err(failure) => {
                let (message,fragment) = failure.into_parts();
                self.fail(epoch,&boundary,&message,fragment)
            }
        }
    }

    fn fail(&self, epoch: u64, boundary: &B::Boundary, message: &str, fragment: Option<B::Fragment>) -> Result<(),Error> {
        Error::content(&format!("<{}>: {}",self.name(),message)).report();
        let rendered = self.failure_fragments(message,fragment).and_then(|fragments| {
            self.replace_content(boundary,fragments)
        });
        self.enter(epoch,LifecycleState::Failed);
        rendered
    }

    fn failure_fragments(&self, message: &str, fragment: Option<B::Fragment>) -> Result<Vec<B::Fragment>,Error> {
        let display = self.0.context.failure_display;
        let generic = match display {
            FailureDisplay::Message | FailureDisplay::Both => true,
            FailureDisplay::Fragment => fragment.is_none()
        };
        let mut out = vec![];
        if generic {
            out.push(self.0.context.backend.error_fragment(self.name(),message)?);
        }
        if display != FailureDisplay::Message {
            out.extend(fragment);
        }
        Ok(out)
    }

    /* Clears earlier content, if any, then appends. The boundary itself is never replaced. */
    fn replace_content(&self, boundary: &B::Boundary, fragments: Vec<B::Fragment>) -> Result<(),Error> {
        let backend = &self.0.context.backend;
        let rendered = lock!(self.0.state).rendered;
        if rendered {
            backend.clear_boundary(boundary)?;
            lock!(self.0.state).rendered = false;
        }
        for fragment in fragments {
            backend.append_fragment(boundary,fragment)?;
            lock!(self.0.state).rendered = true;
        }
        Ok(())
    }

    fn enter(&self, epoch: u64, lifecycle: LifecycleState) -> bool {
        let mut state = lock!(self.0.state);
        if state.epoch != epoch || state.lifecycle != LifecycleState::Connecting {
            return false;
        }
        state.lifecycle = lifecycle;
        state.outcome = Some(lifecycle);
        true
    }

    fn disconnect(&self) {
        let mut state = lock!(self.0.state);
        if !state.lifecycle.is_live() {
            warn_extra!("<{}> disconnected while {}: ignored",self.name(),state.lifecycle);
            return;
        }
        if state.lifecycle == LifecycleState::Connecting {
            log_extra!("<{}> disconnected while connecting, abandoning connection {}",self.name(),state.epoch);
        }
        state.lifecycle = LifecycleState::Disconnected;
    }
}

impl<B: Backend> LifecycleHooks for InstanceController<B> {
    fn on_connect(&self) {
        err_report(self.connect());
    }

    fn on_disconnect(&self) {
        self.disconnect();
    }

    fn on_adopt(&self) {
        let mut state = lock!(self.0.state);
        state.adoptions += 1;
        log_extra!("<{}> adopted into another document while {}",self.name(),state.lifecycle);
    }

    fn on_attribute_change(&self, name: &str, previous: Option<&str>, next: Option<&str>) {
        if !self.0.definition.is_observed(name) {
            return;
        }
        let change = AttributeChange {
            name: name.to_string(),
            previous: previous.map(|x| x.to_string()),
            next: next.map(|x| x.to_string())
        };
        let boundary = self.boundary();
        if let Some(observer) = self.0.definition.observer() {
            observer(&change,boundary.as_ref());
        }
    }
}
