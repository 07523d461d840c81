pub mod analysis;
pub mod ids;
pub mod marker;
pub mod report;
pub mod session;
pub mod user;

pub use analysis::{Analysis, NewAnalysis};
pub use ids::{AnalysisKey, ReportKey, UserKey};
pub use marker::{AbnormalMarkerCount, BloodMarker, TrendPoint};
pub use report::{NewReport, Report};
pub use session::{ActivityType, Session};
pub use user::{User, UserStatistics};
