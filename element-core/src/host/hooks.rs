/// Lifecycle callbacks a host invokes on the object it created for an element occurrence.
///
/// Each is called at most once per transition and never re-entrantly for the same instance.
pub trait LifecycleHooks {
    /// The element was inserted into a live document.
    fn on_connect(&self);
    /// The element was removed from its live document.
    fn on_disconnect(&self);
    /// The element was moved to a new document.
    fn on_adopt(&self);
    /// An attribute changed. `None` means absent.
    fn on_attribute_change(&self, name: &str, previous: Option<&str>, next: Option<&str>);
}
