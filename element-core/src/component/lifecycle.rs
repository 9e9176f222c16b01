use std::fmt;

/* Unattached -> Connecting -> { Connected, Failed } -> Disconnected -> Connecting ...
 * Connecting may also drop straight to Disconnected, abandoning its pending result.
 */
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum LifecycleState {
    Unattached,
    Connecting,
    Connected,
    Failed,
    Disconnected
}

impl LifecycleState {
    /* in a document, whether or not content has arrived */
    pub fn is_live(&self) -> bool {
        match self {
            LifecycleState::Connecting | LifecycleState::Connected | LifecycleState::Failed => true,
            LifecycleState::Unattached | LifecycleState::Disconnected => false
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unattached => "unattached",
            LifecycleState::Connecting => "connecting",
            LifecycleState::Connected => "connected",
            LifecycleState::Failed => "failed",
            LifecycleState::Disconnected => "disconnected"
        };
        write!(f,"{}",name)
    }
}
