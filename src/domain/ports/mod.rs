pub mod actor_provider;
pub mod key_value_store;
pub mod time_service;

pub use actor_provider::ActorProvider;
pub use key_value_store::KeyValueStore;
pub use time_service::TimeService;
