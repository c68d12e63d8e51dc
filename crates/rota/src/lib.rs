pub mod animation;
pub mod candidate;
pub mod color;
pub mod ipc;
mod macros;
pub mod notifier;
pub mod partition;
pub mod policy;
pub mod scheduler;
pub mod selector;
pub mod spinner;

pub use candidate::CandidateName;
pub use color::{HexColor, Palette};
pub use partition::{Partition, Slice};
pub use policy::SpinPolicy;
pub use selector::{SelectionState, Selector, SpinError, SpinOutcome, SpinTicket, Winner};
pub use spinner::Spinner;
