pub mod record;
pub mod ritual;
pub mod user;

pub use record::{NewRitualRecord, RitualRecord, RitualRecordWithUser};
pub use ritual::{attach_users, NewRitual, Ritual, RitualMember, RitualWithUsers, DEFAULT_MINUTES};
pub use user::{NewUser, User};
