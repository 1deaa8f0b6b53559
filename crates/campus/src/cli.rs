//! Clap derive structures for the `campus` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use campus_core::model::UserStatus;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// campus -- admin console for the Campus LMS
#[derive(Debug, Parser)]
#[command(
    name = "campus",
    version,
    about = "Administer a Campus LMS from the command line",
    long_about = "Command-line admin console for the Campus LMS API.\n\n\
        The API endpoint is discovered at startup by probing the configured\n\
        base URL, its /api variant, and the local development server.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides the config file)
    #[arg(long, short = 'u', env = "CAMPUS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, env = "CAMPUS_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session file holding sign-in tokens
    #[arg(long, env = "CAMPUS_SESSION_FILE", global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CAMPUS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CAMPUS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the candidate API endpoints and which one answers
    #[command(alias = "ep")]
    Endpoint(EndpointArgs),

    /// Sign in as a learner or instructor
    Login(LoginArgs),

    /// Sign in as an administrator
    AdminLogin(LoginArgs),

    /// Sign out and clear the stored session
    Logout {
        /// Clear the admin session instead of the user session
        #[arg(long)]
        admin: bool,
    },

    /// Show the signed-in identity from the stored session
    Whoami {
        /// Show the admin identity
        #[arg(long)]
        admin: bool,
    },

    /// Manage your own account (profile, password, avatar)
    Account(AccountArgs),

    /// Manage courses
    #[command(alias = "c")]
    Courses(CoursesArgs),

    /// Issue, revoke, and verify certificates
    #[command(alias = "certs")]
    Certificates(CertificatesArgs),

    /// Manage announcements
    #[command(alias = "ann")]
    Announcements(AnnouncementsArgs),

    /// Moderate discussion forums
    Forums(ForumsArgs),

    /// Read and broadcast notifications
    #[command(alias = "notif")]
    Notifications(NotificationsArgs),

    /// Inspect payments and issue refunds
    #[command(alias = "pay")]
    Payments(PaymentsArgs),

    /// Dashboard statistics and user administration
    Admin(AdminArgs),

    /// Read and change platform settings
    Settings(SettingsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Pagination and filtering arguments shared by list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: u32,

    /// Filter as KEY=VALUE (repeatable). An empty VALUE is ignored.
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENDPOINT / AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EndpointArgs {
    /// Only print the candidate list, without probing
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// Keeps the password out of `-vv` debug output.
impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Fetch your profile from the server
    Show,

    /// Update profile fields
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Change your password (prompts for both values)
    Password,

    /// Exchange the stored token for a fresh one
    RefreshToken,

    /// Upload a new avatar image
    Avatar {
        /// Image file (PNG, JPEG, GIF or WebP)
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COURSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CoursesCommand {
    /// List courses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show course details
    Get { id: String },

    /// Create a course
    Create(CourseFields),

    /// Update a course (only the given fields change)
    Update {
        id: String,
        #[command(flatten)]
        fields: CourseFields,
    },

    /// Delete a course
    #[command(alias = "rm")]
    Delete { id: String },

    /// Make a course visible to learners
    Publish { id: String },

    /// Hide a course from learners
    Unpublish { id: String },

    /// List a course's enrollments
    Enrollments {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Debug, Args)]
pub struct CourseFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CERTIFICATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CertificatesArgs {
    #[command(subcommand)]
    pub command: CertificatesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CertificatesCommand {
    /// List certificates
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show certificate details
    Get { id: String },

    /// Issue a certificate for a completed course
    Issue {
        #[arg(long)]
        user: String,
        #[arg(long)]
        course: String,
    },

    /// Revoke a certificate
    Revoke {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Check a certificate code
    Verify { code: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANNOUNCEMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnnouncementsArgs {
    #[command(subcommand)]
    pub command: AnnouncementsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnnouncementsCommand {
    #[command(alias = "ls")]
    List(ListArgs),

    Get { id: String },

    Create(AnnouncementFields),

    Update {
        id: String,
        #[command(flatten)]
        fields: AnnouncementFields,
    },

    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct AnnouncementFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
    /// Target audience (e.g. all, students, instructors)
    #[arg(long)]
    pub audience: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FORUMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ForumsArgs {
    #[command(subcommand)]
    pub command: ForumsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ForumsCommand {
    #[command(alias = "ls")]
    List(ListArgs),

    Get { id: String },

    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Attach the forum to a course
        #[arg(long)]
        course: Option<String>,
    },

    #[command(alias = "rm")]
    Delete { id: String },

    /// List posts in a forum
    Posts {
        forum: String,
        #[command(flatten)]
        list: ListArgs,
    },

    /// Remove a single post
    DeletePost { forum: String, post: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NOTIFICATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    #[command(alias = "ls")]
    List(ListArgs),

    /// Mark one notification as read
    Read { id: String },

    /// Mark every notification as read
    ReadAll,

    #[command(alias = "rm")]
    Delete { id: String },

    /// Send a notification to many users
    Broadcast {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        /// Notification type (info, warning, ...)
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        audience: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    #[command(alias = "ls")]
    List(ListArgs),

    Get { id: String },

    /// Revenue summary
    Stats {
        /// Reporting period (e.g. week, month, year)
        #[arg(long)]
        period: Option<String>,
    },

    /// Most recent payments
    Recent {
        #[arg(long, short = 'l', default_value = "5")]
        limit: u32,
    },

    /// Refund a payment
    Refund {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Headline platform numbers
    Dashboard,

    /// List user accounts
    Users(ListArgs),

    /// Activate, suspend, or ban a user
    SetStatus {
        id: String,
        /// active, inactive, suspended, or banned
        #[arg(value_parser = parse_user_status)]
        status: UserStatus,
    },
}

fn parse_user_status(s: &str) -> Result<UserStatus, String> {
    match s.parse::<UserStatus>() {
        Ok(UserStatus::Unknown) | Err(_) => Err(format!(
            "expected one of active, inactive, suspended, banned; got '{s}'"
        )),
        Ok(status) => Ok(status),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show all settings
    Get,

    /// Change settings. VALUE is parsed as JSON, else taken as a string.
    Set {
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
