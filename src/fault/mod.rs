pub mod injector;

pub use injector::{FaultInjector, InjectionOutcome, NUDGE_SPAN_DEG};
