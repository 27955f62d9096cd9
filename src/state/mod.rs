// ============================================================================
// STATE - Observable stores the UI layer renders
// ============================================================================
// Single-threaded cooperative model: every store is a cheap clone sharing its
// innards via Rc, mutation funnels through store methods, and async work
// suspends only at the network boundary.
// ============================================================================

pub mod comparison;
pub mod debounce;
pub mod incident_poller;
pub mod location;
pub mod location_sync;
pub mod observable;
pub mod plan;
pub mod resource;
pub mod reviews;
pub mod search;
pub mod session;

pub use comparison::{ComparisonEntry, ComparisonStore};
pub use debounce::Debouncer;
pub use incident_poller::{IncidentPoller, RefreshIndicator};
pub use location::LocationStore;
pub use location_sync::LocationSync;
pub use observable::Observable;
pub use plan::{PlanState, PlanStore};
pub use resource::RefreshableResource;
pub use reviews::ReviewStore;
pub use search::{SearchSession, SearchState, TargetField};
pub use session::{LoginPayload, Persistence, RegisterPayload, Session, SessionStatus, SessionStore};
