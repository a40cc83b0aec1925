pub mod guard;

pub use guard::{GuardOutcome, RouteGuard};
