pub mod details;
pub mod hole;
pub mod new;
pub mod scorecard;

pub use details::*;
pub use hole::*;
pub use new::*;
pub use scorecard::*;
