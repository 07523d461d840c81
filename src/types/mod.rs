mod analysis;
mod analyze;
mod report;
mod user;

pub use analysis::*;
pub use analyze::*;
pub use report::*;
pub use user::*;
