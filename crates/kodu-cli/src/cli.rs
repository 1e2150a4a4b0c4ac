//! Argument parsing and command dispatch for the `kodu` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kodu_api_models::{AttendanceStatus, Role};
use kodu_core::endpoints::DEFAULT_API_BASE;
use kodu_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, command_span, init_logging};
use tracing::Instrument;
use url::Url;

use crate::client::{AppContext, CliResult, build_client, parse_url};
use crate::commands::{
    assignments, attendance, auth, batches, complaints, courses, fees, students, users,
};
use crate::token_store::{FileTokenStore, default_token_path};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Parses CLI arguments, executes the requested command and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("KODU_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: logging disabled: {err}");
    }

    let span = command_span(command_label(&cli.command));
    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext {
        client: build_client(cli.timeout)?,
        base_url: cli.api_url,
        tokens: FileTokenStore::new(cli.token_file.unwrap_or_else(default_token_path)),
    };
    let format = cli.output;

    match cli.command {
        Command::Login(args) => auth::handle_login(&ctx, args, format).await,
        Command::Logout => auth::handle_logout(&ctx, format),
        Command::Register(args) => auth::handle_register(&ctx, args, format).await,
        Command::Whoami => auth::handle_whoami(&ctx, format),
        Command::Users(command) => match command {
            UsersCommand::Pending => users::handle_pending(&ctx, format).await,
            UsersCommand::Approve(args) => users::handle_decision(&ctx, args, true, format).await,
            UsersCommand::Reject(args) => users::handle_decision(&ctx, args, false, format).await,
        },
        Command::Students(command) => match command {
            StudentsCommand::Pending => students::handle_pending(&ctx, format).await,
            StudentsCommand::Approve(args) => students::handle_approve(&ctx, args, format).await,
            StudentsCommand::ApproveAll => students::handle_approve_all(&ctx, format).await,
            StudentsCommand::List => students::handle_list(&ctx, format).await,
            StudentsCommand::Show(args) => students::handle_show(&ctx, args, format).await,
            StudentsCommand::UpdateProfile(args) => {
                students::handle_update_profile(&ctx, args, format).await
            }
        },
        Command::Courses(command) => match command {
            CoursesCommand::List => courses::handle_list(&ctx, format).await,
            CoursesCommand::Add(args) => courses::handle_add(&ctx, args, format).await,
        },
        Command::Batches(command) => match command {
            BatchesCommand::List => batches::handle_list(&ctx, format).await,
            BatchesCommand::Create(args) => batches::handle_create(&ctx, args, format).await,
            BatchesCommand::Roster(args) => batches::handle_roster(&ctx, args, format).await,
        },
        Command::Attendance(command) => match command {
            AttendanceCommand::Mark(args) => attendance::handle_mark(&ctx, args, format).await,
            AttendanceCommand::Summary(args) => {
                attendance::handle_summary(&ctx, args, format).await
            }
        },
        Command::Assignments(command) => match command {
            AssignmentsCommand::Upload(args) => assignments::handle_upload(&ctx, args, format).await,
            AssignmentsCommand::Titles(args) => assignments::handle_titles(&ctx, args, format).await,
            AssignmentsCommand::List(args) => assignments::handle_list(&ctx, args, format).await,
            AssignmentsCommand::Submit(args) => assignments::handle_submit(&ctx, args, format).await,
            AssignmentsCommand::ByBatch(args) => {
                assignments::handle_by_batch(&ctx, args, format).await
            }
        },
        Command::Fees(command) => match command {
            FeesCommand::Set(args) => fees::handle_set(&ctx, args, format).await,
            FeesCommand::Order(args) => fees::handle_order(&ctx, args, format).await,
            FeesCommand::Verify(args) => fees::handle_verify(&ctx, args, format).await,
        },
        Command::Complaints(command) => match command {
            ComplaintsCommand::List => complaints::handle_list(&ctx, format).await,
            ComplaintsCommand::Create(args) => complaints::handle_create(&ctx, args, format).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "kodu", about = "Kodu ERP command-line client", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "KODU_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_BASE
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "KODU_TOKEN_FILE",
        help = "Where the bearer token is kept (defaults to ~/.kodu/token)"
    )]
    token_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "KODU_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(long, global = true, env = "KODU_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[arg(long, global = true, env = "KODU_LOG_FORMAT", help = "json or pretty")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the bearer token.
    Login(LoginArgs),
    /// Forget the stored token.
    Logout,
    /// Create an account awaiting approval.
    Register(RegisterArgs),
    /// Show the logged-in user.
    Whoami,
    /// Account approvals (admin).
    #[command(subcommand)]
    Users(UsersCommand),
    /// Student approvals, listings and profiles.
    #[command(subcommand)]
    Students(StudentsCommand),
    /// Course catalogue.
    #[command(subcommand)]
    Courses(CoursesCommand),
    /// Batches and rosters.
    #[command(subcommand)]
    Batches(BatchesCommand),
    /// Attendance marking and summaries.
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Assignment upload, listing and submission.
    #[command(subcommand)]
    Assignments(AssignmentsCommand),
    /// Fee setup and payments.
    #[command(subcommand)]
    Fees(FeesCommand),
    /// Student complaints.
    #[command(subcommand)]
    Complaints(ComplaintsCommand),
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "KODU_PASSWORD", help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "KODU_PASSWORD", help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
    #[arg(long, help = "trainer, counsellor, student or admin")]
    pub(crate) role: Role,
}

#[derive(Subcommand)]
enum UsersCommand {
    /// Accounts awaiting approval.
    Pending,
    /// Approve an account.
    Approve(IdArg),
    /// Reject an account.
    Reject(IdArg),
}

#[derive(Args)]
pub(crate) struct IdArg {
    #[arg(help = "Record identifier")]
    pub(crate) id: String,
}

#[derive(Subcommand)]
enum StudentsCommand {
    /// Students awaiting approval.
    Pending,
    /// Approve one student.
    Approve(IdArg),
    /// Approve every pending student.
    ApproveAll,
    /// Every student.
    List,
    /// One student's profile (defaults to the logged-in student).
    Show(ShowStudentArgs),
    /// Update the logged-in student's profile.
    UpdateProfile(UpdateProfileArgs),
}

#[derive(Args)]
pub(crate) struct ShowStudentArgs {
    #[arg(help = "Student identifier (defaults to the logged-in user)")]
    pub(crate) id: Option<String>,
}

#[derive(Args)]
pub(crate) struct UpdateProfileArgs {
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) whatsapp: Option<String>,
    #[arg(long)]
    pub(crate) parent_phone: Option<String>,
    #[arg(long)]
    pub(crate) education: Option<String>,
    #[arg(long = "course", help = "Course id; repeat to enrol in several")]
    pub(crate) courses: Vec<String>,
}

#[derive(Subcommand)]
enum CoursesCommand {
    /// Every course.
    List,
    /// Create a course from a JSON file.
    Add(AddCourseArgs),
}

#[derive(Args)]
pub(crate) struct AddCourseArgs {
    #[arg(long, help = "JSON file holding courseName, description, subjects and topics")]
    pub(crate) file: PathBuf,
}

#[derive(Subcommand)]
enum BatchesCommand {
    /// Every batch.
    List,
    /// Schedule a batch.
    Create(CreateBatchArgs),
    /// Students enrolled in a batch.
    Roster(BatchArg),
}

#[derive(Args)]
pub(crate) struct CreateBatchArgs {
    #[arg(long)]
    pub(crate) course: String,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, help = "YYYY-MM-DD")]
    pub(crate) start_date: String,
    #[arg(long, help = "YYYY-MM-DD")]
    pub(crate) end_date: String,
    #[arg(long, help = "HH:MM")]
    pub(crate) start_time: String,
    #[arg(long, help = "HH:MM")]
    pub(crate) end_time: String,
    #[arg(long = "student", help = "Student id; repeat to enrol several")]
    pub(crate) students: Vec<String>,
}

#[derive(Args)]
pub(crate) struct BatchArg {
    #[arg(help = "Batch identifier")]
    pub(crate) batch: String,
}

#[derive(Subcommand)]
enum AttendanceCommand {
    /// Mark a day's attendance; unlisted students are absent.
    Mark(MarkAttendanceArgs),
    /// Attendance summary of one student in a batch.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub(crate) struct MarkAttendanceArgs {
    #[arg(long)]
    pub(crate) batch: String,
    #[arg(long, help = "YYYY-MM-DD")]
    pub(crate) date: String,
    #[arg(long, value_delimiter = ',')]
    pub(crate) present: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub(crate) late: Vec<String>,
}

impl MarkAttendanceArgs {
    /// Explicit marks in command-line order; `late` wins over `present`.
    pub(crate) fn marks(&self) -> impl Iterator<Item = (&str, AttendanceStatus)> {
        self.present
            .iter()
            .map(|id| (id.as_str(), AttendanceStatus::Present))
            .chain(self.late.iter().map(|id| (id.as_str(), AttendanceStatus::Late)))
    }
}

#[derive(Args)]
pub(crate) struct SummaryArgs {
    #[arg(long)]
    pub(crate) batch: String,
    #[arg(long, help = "Student identifier (defaults to the logged-in user)")]
    pub(crate) student: Option<String>,
}

#[derive(Subcommand)]
enum AssignmentsCommand {
    /// Upload an assignment file to a batch.
    Upload(UploadArgs),
    /// Assignment titles of a batch.
    Titles(TitlesArgs),
    /// Assignments of a batch with a given title.
    List(ListAssignmentsArgs),
    /// Submit a link for an assignment.
    Submit(SubmitArgs),
    /// Every assignment of a batch with its submissions.
    ByBatch(BatchArg),
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    #[arg(long)]
    pub(crate) batch: String,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args)]
pub(crate) struct TitlesArgs {
    #[arg(long, help = "Batch identifier (defaults to the logged-in student's batch)")]
    pub(crate) batch: Option<String>,
}

#[derive(Args)]
pub(crate) struct ListAssignmentsArgs {
    #[arg(long, help = "Batch identifier (defaults to the logged-in student's batch)")]
    pub(crate) batch: Option<String>,
    #[arg(long)]
    pub(crate) title: String,
}

#[derive(Args)]
pub(crate) struct SubmitArgs {
    #[arg(help = "Assignment identifier")]
    pub(crate) assignment: String,
    #[arg(long)]
    pub(crate) link: String,
}

#[derive(Subcommand)]
enum FeesCommand {
    /// Set the total fee of a student.
    Set(FeeArgs),
    /// Raise a payment order.
    Order(FeeArgs),
    /// Record a completed gateway payment.
    Verify(VerifyArgs),
}

#[derive(Args)]
pub(crate) struct FeeArgs {
    #[arg(long)]
    pub(crate) student: String,
    #[arg(long, help = "Whole rupees")]
    pub(crate) amount: String,
}

#[derive(Args)]
pub(crate) struct VerifyArgs {
    #[command(flatten)]
    pub(crate) fee: FeeArgs,
    #[arg(long)]
    pub(crate) order_id: String,
    #[arg(long)]
    pub(crate) payment_id: String,
}

#[derive(Subcommand)]
enum ComplaintsCommand {
    /// Every complaint.
    List,
    /// Raise a complaint about a trainer.
    Create(ComplaintArgs),
}

#[derive(Args)]
pub(crate) struct ComplaintArgs {
    #[arg(long)]
    pub(crate) trainer: String,
    #[arg(long)]
    pub(crate) message: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Register(_) => "register",
        Command::Whoami => "whoami",
        Command::Users(UsersCommand::Pending) => "users_pending",
        Command::Users(UsersCommand::Approve(_)) => "users_approve",
        Command::Users(UsersCommand::Reject(_)) => "users_reject",
        Command::Students(StudentsCommand::Pending) => "students_pending",
        Command::Students(StudentsCommand::Approve(_)) => "students_approve",
        Command::Students(StudentsCommand::ApproveAll) => "students_approve_all",
        Command::Students(StudentsCommand::List) => "students_list",
        Command::Students(StudentsCommand::Show(_)) => "students_show",
        Command::Students(StudentsCommand::UpdateProfile(_)) => "students_update_profile",
        Command::Courses(CoursesCommand::List) => "courses_list",
        Command::Courses(CoursesCommand::Add(_)) => "courses_add",
        Command::Batches(BatchesCommand::List) => "batches_list",
        Command::Batches(BatchesCommand::Create(_)) => "batches_create",
        Command::Batches(BatchesCommand::Roster(_)) => "batches_roster",
        Command::Attendance(AttendanceCommand::Mark(_)) => "attendance_mark",
        Command::Attendance(AttendanceCommand::Summary(_)) => "attendance_summary",
        Command::Assignments(AssignmentsCommand::Upload(_)) => "assignments_upload",
        Command::Assignments(AssignmentsCommand::Titles(_)) => "assignments_titles",
        Command::Assignments(AssignmentsCommand::List(_)) => "assignments_list",
        Command::Assignments(AssignmentsCommand::Submit(_)) => "assignments_submit",
        Command::Assignments(AssignmentsCommand::ByBatch(_)) => "assignments_by_batch",
        Command::Fees(FeesCommand::Set(_)) => "fees_set",
        Command::Fees(FeesCommand::Order(_)) => "fees_order",
        Command::Fees(FeesCommand::Verify(_)) => "fees_verify",
        Command::Complaints(ComplaintsCommand::List) => "complaints_list",
        Command::Complaints(ComplaintsCommand::Create(_)) => "complaints_create",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kodu").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults_point_at_hosted_api() {
        let cli = parse(&["whoami"]);
        assert_eq!(cli.api_url.as_str(), DEFAULT_API_BASE);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cli.output, OutputFormat::Table);
        assert!(matches!(cli.command, Command::Whoami));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = parse(&[
            "students",
            "list",
            "--output",
            "json",
            "--api-url",
            "http://localhost:5000/api",
            "--token-file",
            "/tmp/kodu-token",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.api_url.as_str(), "http://localhost:5000/api");
        assert_eq!(cli.token_file, Some(PathBuf::from("/tmp/kodu-token")));
        assert_eq!(command_label(&cli.command), "students_list");
    }

    #[test]
    fn register_parses_role() {
        let cli = parse(&[
            "register", "--name", "Asha", "--email", "asha@kodu.test", "--password", "pw",
            "--role", "counselor",
        ]);
        let Command::Register(args) = cli.command else {
            panic!("expected register");
        };
        assert_eq!(args.role, Role::Counsellor);
        assert!(
            Cli::try_parse_from(["kodu", "register", "--name", "a", "--email", "b", "--role", "boss"])
                .is_err()
        );
    }

    #[test]
    fn attendance_marks_accept_comma_lists() {
        let cli = parse(&[
            "attendance", "mark", "--batch", "b1", "--date", "2024-05-01", "--present", "A,C",
            "--late", "B",
        ]);
        let Command::Attendance(AttendanceCommand::Mark(args)) = cli.command else {
            panic!("expected attendance mark");
        };
        let marks: Vec<_> = args.marks().collect();
        assert_eq!(
            marks,
            vec![
                ("A", AttendanceStatus::Present),
                ("C", AttendanceStatus::Present),
                ("B", AttendanceStatus::Late),
            ]
        );
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        assert!(Cli::try_parse_from(["kodu", "--api-url", "not a url", "whoami"]).is_err());
    }

    #[test]
    fn command_labels_are_snake_case() {
        assert_eq!(
            command_label(&Command::Fees(FeesCommand::Verify(VerifyArgs {
                fee: FeeArgs {
                    student: "s1".into(),
                    amount: "500".into(),
                },
                order_id: "order_1".into(),
                payment_id: "pay_1".into(),
            }))),
            "fees_verify"
        );
        assert_eq!(command_label(&Command::Logout), "logout");
    }
}
