pub mod aggregate;
pub mod allocator;
pub mod area;
pub mod context;
pub mod error;
pub mod guard;
pub mod noop;
pub mod payload;
pub mod ports;
pub mod resolver;
pub mod segments;
pub mod session;
pub mod state;
pub mod types;
pub mod validation;

pub use aggregate::{contributed_area, remaining_area, selected_area_total};
pub use allocator::GreedyAllocator;
pub use area::{AREA_EPSILON, parse_area_input, round2};
pub use context::LeaseContext;
pub use error::{AllocationError, AllocationErrorKind};
pub use guard::SnapshotAvailabilityGuard;
pub use noop::NoopAvailabilityGuard;
pub use payload::PayloadBuilder;
pub use ports::AvailabilityGuard;
pub use resolver::TargetResolver;
pub use segments::{SegmentManager, reduce};
pub use session::AllocationSession;
pub use state::AllocationState;
pub use types::{
    AllocationMode, AllocationPlan, AllocationSettings, LeaseEnvelope, LeaseItem, LeaseTerms,
    RateDefaults, RateType, Segment, SegmentPayload, SelectionAction, SelectionMap,
    SelectionMode, SelectionSummary, SessionCommand, SessionEvent, SessionOutput,
    SubmissionPayload, TargetParams, UiSelection, UnitSelection,
};
pub use validation::{
    IssueSeverity, ValidationEngine, ValidationInput, ValidationIssue, ValidationReport,
};
