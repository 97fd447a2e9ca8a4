pub mod error;
pub mod job_state;
pub mod outputs;
pub mod phase;
pub mod traits;

pub use error::*;
pub use job_state::*;
pub use outputs::*;
pub use phase::*;
pub use traits::*;
