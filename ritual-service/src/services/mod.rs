pub mod database;
pub mod memory;
pub mod metrics;
pub mod providers;
pub mod rituals;
pub mod store;

pub use database::RitualDb;
pub use memory::MemoryStore;
pub use metrics::{get_metrics, init_metrics, record_created, record_push};
pub use providers::{
    FcmProvider, MockPushProvider, ProviderError, ProviderResponse, PushMessage, PushProvider,
};
pub use rituals::{create_ritual, get_or_create_user, UserLookup};
pub use store::{RitualStore, StoreError};
