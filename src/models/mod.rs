pub mod profile;
pub mod user;

pub use profile::{ProfileFields, ProfileSummary, ProfileUpdateResponse, TalentProfile};
pub use user::User;
