//! Best-effort outbound notifications.
//!
//! Notification failures are always logged and swallowed at the call site;
//! they never fail the primary operation.

pub mod email;
