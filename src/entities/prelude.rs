pub use super::availability::Entity as Availability;
pub use super::event::Entity as Event;
pub use super::event_skill::Entity as EventSkill;
pub use super::notification::Entity as Notification;
pub use super::profile::Entity as Profile;
pub use super::skill::Entity as Skill;
pub use super::user::Entity as User;
pub use super::volunteer_history::Entity as VolunteerHistory;
