// ── Domain model ──
//
// Shapes of the resources the admin console manages. The backend is
// loose about field presence, so almost everything is optional and
// undocumented fields land in `extra`.

pub mod announcement;
pub mod certificate;
pub mod course;
pub mod dashboard;
pub mod forum;
pub mod notification;
pub mod page;
pub mod payment;
pub mod settings;
pub mod user;

pub use announcement::{Announcement, AnnouncementDraft};
pub use certificate::{Certificate, CertificateVerification, IssueCertificateRequest};
pub use course::{Course, CourseDraft, Enrollment};
pub use dashboard::DashboardStats;
pub use forum::{Forum, ForumDraft, ForumPost};
pub use notification::{BroadcastRequest, Notification};
pub use page::{Page, Pagination};
pub use payment::{Payment, PaymentStats, PaymentStatus};
pub use settings::Settings;
pub use user::{User, UserStatus};
