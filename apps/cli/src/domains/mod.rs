pub mod actions;
pub mod attachments;
pub mod card_memberships;
pub mod notifications;
pub mod users;
