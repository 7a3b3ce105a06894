// Markstash view controllers
// One controller per page, sharing a session-gated state machine: the
// landing page with the login affordance, the auth callback target, and the
// bookmark list. Navigation goes through the navigator seam.

pub mod bookmarks;
pub mod callback;
pub mod landing;
pub mod navigator;
