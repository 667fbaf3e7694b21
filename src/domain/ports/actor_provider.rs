use crate::domain::entities::Actor;

/// Resolves who is currently acting. `None` means nobody is signed in.
pub trait ActorProvider: Send + Sync {
    fn current_actor(&self) -> Option<Actor>;
}
