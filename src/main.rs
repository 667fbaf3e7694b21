use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use projectdeck::bootstrap::{self, AppState};
use projectdeck::config::Config;
use projectdeck::infrastructure::observability;
use projectdeck::{
    ActivityAction, ActivityFilter, NewActivity, NewNotification, NotificationFilter,
    NotificationType, Permission, PermissionService, ReadFilter, Role, TargetType, User,
    DEFAULT_RECENT_LIMIT,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "projectdeck",
    version,
    about = "Inspect and manage the project dashboard's activity log, notifications and roles"
)]
struct Cli {
    /// Directory holding the persisted logs (overrides PROJECTDECK_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Activity log
    #[command(subcommand)]
    Activity(ActivityCommand),
    /// Notification center
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Role permission table
    #[command(subcommand)]
    Permissions(PermissionCommand),
}

#[derive(Subcommand, Debug)]
enum ActivityCommand {
    /// List activities matching every given filter, newest first
    List(ActivityListArgs),
    /// Show the newest activities
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
    /// Aggregate counts by action, actor and day
    Stats,
    /// Record an activity
    Record(ActivityRecordArgs),
    /// Remove activities older than the given number of days
    Purge {
        #[arg(long)]
        days: u32,
        /// Role performing the purge
        #[arg(long)]
        role: String,
    },
    /// Remove every activity
    Clear {
        /// Role performing the clear
        #[arg(long)]
        role: String,
    },
}

#[derive(Args, Debug)]
struct ActivityListArgs {
    #[arg(long)]
    action: Option<ActivityAction>,
    #[arg(long)]
    target_type: Option<TargetType>,
    /// Only activities by this user id
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Inclusive lower bound (RFC 3339)
    #[arg(long)]
    from: Option<DateTime<Utc>>,
    /// Inclusive upper bound (RFC 3339)
    #[arg(long)]
    to: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct ActivityRecordArgs {
    #[arg(long)]
    action: ActivityAction,
    #[arg(long)]
    target_type: TargetType,
    #[arg(long)]
    description: String,
    #[arg(long)]
    target_id: Option<String>,
    #[arg(long)]
    target_name: Option<String>,
    /// Attribute the activity to this user id instead of the guest
    #[arg(long = "as", value_name = "USER_ID")]
    as_user: Option<String>,
    #[arg(long, requires = "as_user")]
    name: Option<String>,
    #[arg(long, requires = "as_user")]
    email: Option<String>,
    /// Role of the `--as` user
    #[arg(long, default_value = "member")]
    role: Role,
}

#[derive(Subcommand, Debug)]
enum NotificationCommand {
    /// List notifications matching every given filter, newest first
    List {
        #[arg(long = "type")]
        notification_type: Option<NotificationType>,
        #[arg(long, conflicts_with = "unread")]
        read: bool,
        #[arg(long)]
        unread: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Add an unread notification
    Add {
        #[arg(long = "type", default_value = "info")]
        notification_type: NotificationType,
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
    },
    MarkRead { id: String },
    MarkUnread { id: String },
    MarkAllRead,
    Delete { id: String },
    /// Delete every read notification
    DeleteRead,
    Clear,
}

#[derive(Subcommand, Debug)]
enum PermissionCommand {
    /// Print a role's permissions
    List { role: String },
    /// Check one `resource:action` permission for a role
    Check { role: String, permission: Permission },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    observability::init(&config);

    match cli.command {
        Command::Permissions(command) => run_permissions(command),
        Command::Activity(command) => run_activity(bootstrap::build_app_state(&config), command),
        Command::Notifications(command) => {
            run_notifications(bootstrap::build_app_state(&config), command)
        }
    }
}

fn run_activity(mut state: AppState, command: ActivityCommand) -> anyhow::Result<()> {
    match command {
        ActivityCommand::List(args) => {
            let mut filter = ActivityFilter::new().between(args.from, args.to);
            filter.action = args.action;
            filter.target_type = args.target_type;
            filter.user_id = args.user;
            filter.search_query = args.search;
            print_json(&state.activities.query(&filter))
        }
        ActivityCommand::Recent { limit } => print_json(&state.activities.recent(limit)),
        ActivityCommand::Stats => print_json(&state.activities.stats()),
        ActivityCommand::Record(args) => {
            if let Some(id) = args.as_user {
                let name = args.name.unwrap_or_else(|| id.clone());
                let email = args
                    .email
                    .unwrap_or_else(|| format!("{}@projectdeck.local", id));
                state.session.sign_in(User::new(id, name, email, args.role));
            }

            let mut new = NewActivity::new(args.action, args.target_type, args.description);
            new.target_id = args.target_id;
            new.target_name = args.target_name;
            state.activities.record(new);

            print_json(&state.activities.recent(1))
        }
        ActivityCommand::Purge { days, role } => {
            require(&role, &Permission::of("purge", "activity"))?;
            let removed = state.activities.purge_older_than(days);
            print_json(&json!({ "removed": removed, "remaining": state.activities.len() }))
        }
        ActivityCommand::Clear { role } => {
            require(&role, &Permission::of("purge", "activity"))?;
            let removed = state.activities.clear_all();
            print_json(&json!({ "removed": removed }))
        }
    }
}

fn run_notifications(mut state: AppState, command: NotificationCommand) -> anyhow::Result<()> {
    let notifications = &mut state.notifications;

    match command {
        NotificationCommand::List {
            notification_type,
            read,
            unread,
            search,
        } => {
            let read_filter = match (read, unread) {
                (true, _) => ReadFilter::Read,
                (_, true) => ReadFilter::Unread,
                _ => ReadFilter::All,
            };
            let filter = NotificationFilter {
                notification_type,
                read: read_filter,
                search_query: search,
            };
            print_json(&json!({
                "unread_count": notifications.unread_count(),
                "notifications": notifications.get_filtered(&filter),
            }))
        }
        NotificationCommand::Add {
            notification_type,
            title,
            message,
        } => {
            let id = notifications.add(NewNotification::new(notification_type, title, message));
            print_json(&notifications.get(&id))
        }
        NotificationCommand::MarkRead { id } => {
            print_json(&json!({ "changed": notifications.mark_read(&id) }))
        }
        NotificationCommand::MarkUnread { id } => {
            print_json(&json!({ "changed": notifications.mark_unread(&id) }))
        }
        NotificationCommand::MarkAllRead => {
            print_json(&json!({ "changed": notifications.mark_all_read() }))
        }
        NotificationCommand::Delete { id } => {
            print_json(&json!({ "deleted": notifications.delete(&id) }))
        }
        NotificationCommand::DeleteRead => {
            print_json(&json!({ "deleted": notifications.delete_all_read() }))
        }
        NotificationCommand::Clear => print_json(&json!({ "deleted": notifications.clear_all() })),
    }
}

fn run_permissions(command: PermissionCommand) -> anyhow::Result<()> {
    match command {
        PermissionCommand::List { role } => {
            let permissions: Vec<String> = PermissionService::get_role_permissions(&role)
                .iter()
                .map(Permission::to_string)
                .collect();
            print_json(&json!({
                "role": role,
                "valid": PermissionService::is_valid_role(&role),
                "permissions": permissions,
            }))
        }
        PermissionCommand::Check { role, permission } => print_json(&json!({
            "role": role,
            "permission": permission.to_string(),
            "allowed": PermissionService::has_permission(&role, &permission),
        })),
    }
}

fn require(role: &str, permission: &Permission) -> anyhow::Result<()> {
    if !PermissionService::has_permission(role, permission) {
        bail!("Role '{}' lacks permission {}", role, permission);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
