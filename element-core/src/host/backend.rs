use std::rc::Rc;
use element_toolkit::error::Error;
use crate::component::controller::InstanceController;

/// Builds the controller for one occurrence of a defined element. Installed with the host by
/// `Backend::register` and called by the host each time it constructs such an element.
pub type InstanceFactory<B> = Rc<dyn Fn(<B as Backend>::Element) -> InstanceController<B>>;

/// The rendering host: whatever actually owns elements, isolation boundaries and markup.
///
/// In the browser this is the DOM with shadow roots. In tests it is `TestBackend`.
///
/// Controllers keep their `Element` and `Boundary` for as long as the host keeps the controller.
/// A host which owns the controller from the element itself must hand out handles which do not
/// keep the element alive, and fail operations on handles whose element has since gone.
pub trait Backend : Sized + 'static {
    /// An occurrence of a custom element in a document.
    type Element: Clone + 'static;
    /// Isolation boundary: markup inside is not reachable from, or styled by, the outside.
    type Boundary: Clone + 'static;
    /// Detached markup produced by a content routine, not yet attached anywhere.
    type Fragment: 'static;

    /// Bind `name` in the host's element-construction mechanism. A host which already knows the
    /// name must fail with `DuplicateRegistration`.
    fn register(&self, name: &str, observed: &[String], factory: InstanceFactory<Self>) -> Result<(),Error>;

    /// Create the isolation boundary for `element`. Called at most once per element.
    fn attach_boundary(&self, element: &Self::Element) -> Result<Self::Boundary,Error>;

    /// Move the children of `fragment` to the end of `boundary`.
    fn append_fragment(&self, boundary: &Self::Boundary, fragment: Self::Fragment) -> Result<(),Error>;

    /// Remove everything rendered inside `boundary`, keeping the boundary itself.
    fn clear_boundary(&self, boundary: &Self::Boundary) -> Result<(),Error>;

    /// Generic visible error state for element `name`, mentioning `message`.
    fn error_fragment(&self, name: &str, message: &str) -> Result<Self::Fragment,Error>;
}
