use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Result, eyre};
use std::path::PathBuf;
use taskboard::codec::parse_timestamp;
use taskboard::{
    BackendKind, Config, MoveTask, Priority, SortKey, Task, TaskDraft, TaskFilters, TaskStatus, distinct_assignees,
    distinct_tags, filter, group_by_status, sort,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard - kanban board and backlog for local tasks")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/taskboard/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the store directory (overrides config)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks grouped into scheduled, in-progress and done columns
    Board(FilterArgs),

    /// List tasks as a flat, sorted backlog
    Backlog {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort by createdAt, title, assignee or priority
        #[arg(long, default_value_t = SortKey::CreatedAt)]
        sort: SortKey,
    },

    /// Show one task in full
    Show { id: String },

    /// Create a task
    Add(TaskFields),

    /// Edit a task
    Edit {
        id: String,

        #[command(flatten)]
        fields: TaskFields,
    },

    /// Delete a task
    Delete { id: String },

    /// Move a task to another column
    Move { id: String, status: TaskStatus },

    /// List the assignees and tags available for filtering
    Facets,
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive text in title or description
    #[arg(long, default_value = "")]
    search: String,

    /// Exact assignee
    #[arg(long, default_value = "")]
    assignee: String,

    /// Exact tag
    #[arg(long, default_value = "")]
    tag: String,
}

impl From<FilterArgs> for TaskFilters {
    fn from(args: FilterArgs) -> Self {
        TaskFilters {
            search: args.search,
            assignee: args.assignee,
            tag: args.tag,
        }
    }
}

#[derive(Args)]
struct TaskFields {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// scheduled, in-progress or done
    #[arg(long)]
    status: Option<TaskStatus>,

    #[arg(long)]
    assignee: Option<String>,

    /// Tag (repeatable). Replaces all tags when editing.
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Add a tag, keeping the existing ones
    #[arg(long)]
    add_tag: Vec<String>,

    /// Remove a tag
    #[arg(long)]
    remove_tag: Vec<String>,

    /// low, medium or high
    #[arg(long)]
    priority: Option<Priority>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_due)]
    due: Option<DateTime<Utc>>,

    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    clear_due: bool,
}

impl TaskFields {
    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            status: self.status,
            assignee: self.assignee,
            tags: (!self.tags.is_empty()).then_some(self.tags),
            priority: self.priority,
            due_date: self.due,
            clear_due_date: self.clear_due,
            add_tags: self.add_tag,
            remove_tags: self.remove_tag,
        }
    }
}

fn parse_due(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.store_path {
        config.store_path = path;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    // Setup tracing
    let level = if cli.verbose { Level::DEBUG } else { config.level()? };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut store = config.open_store();
    let tasks = store.load();

    match cli.command {
        Commands::Board(args) => {
            let filters = TaskFilters::from(args);
            let visible = filter(tasks.as_slice(), &filters);
            let board = group_by_status(&visible);

            for (status, column) in board.columns() {
                println!("{} ({})", status_label(status).bold(), column.len());
                if column.is_empty() {
                    println!("  {}", "No tasks".dimmed());
                }
                for task in column {
                    print_card(task);
                }
                println!();
            }
        }
        Commands::Backlog { filters, sort: key } => {
            let filters = TaskFilters::from(filters);
            let visible = sort(filter(tasks.as_slice(), &filters), key);

            println!("{} ({} of {}, by {})", "Task Backlog".bold(), visible.len(), tasks.len(), key);
            if visible.is_empty() {
                println!("  {}", "No tasks match the current filters".dimmed());
            }
            for task in visible {
                println!(
                    "  {:<12} {} {}  {}  {}",
                    status_badge(task.status),
                    priority_dot(task.priority),
                    task.title.bold(),
                    assignee_text(task),
                    task.created_at.format("%b %-d, %Y").to_string().dimmed(),
                );
            }
        }
        Commands::Show { id } => {
            let task = tasks.get(&id).ok_or_else(|| eyre!("Task not found: {}", id))?;
            print_detail(task);
        }
        Commands::Add(fields) => {
            let task = fields.into_draft().into_new_task()?;

            let id = task.id.clone();
            let tasks = tasks.upsert(task);
            store.save(&tasks);
            println!("Created task {}", id);
        }
        Commands::Edit { id, fields } => {
            let existing = tasks.get(&id).cloned().ok_or_else(|| eyre!("Task not found: {}", id))?;
            let task = fields.into_draft().apply_to(existing)?;

            let tasks = tasks.upsert(task);
            store.save(&tasks);
            println!("Updated task {}", id);
        }
        Commands::Delete { id } => {
            if !tasks.contains(&id) {
                println!("No task with id {}", id);
                return Ok(());
            }
            let tasks = tasks.delete(&id);
            store.save(&tasks);
            println!("Deleted task {}", id);
        }
        Commands::Move { id, status } => {
            if !tasks.contains(&id) {
                println!("No task with id {}", id);
                return Ok(());
            }
            let tasks = tasks.apply(MoveTask::new(id.clone(), status));
            store.save(&tasks);
            println!("Moved task {} to {}", id, status_label(status));
        }
        Commands::Facets => {
            println!("{}", "Assignees".bold());
            for assignee in distinct_assignees(tasks.as_slice()) {
                println!("  {}", assignee);
            }
            println!("{}", "Tags".bold());
            for tag in distinct_tags(tasks.as_slice()) {
                println!("  #{}", tag);
            }
        }
    }

    Ok(())
}

fn status_label(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Scheduled => status.label().blue(),
        TaskStatus::InProgress => status.label().yellow(),
        TaskStatus::Done => status.label().green(),
    }
}

fn status_badge(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Scheduled => status.as_str().blue(),
        TaskStatus::InProgress => status.as_str().yellow(),
        TaskStatus::Done => status.as_str().green(),
    }
}

fn priority_dot(priority: Option<Priority>) -> ColoredString {
    match priority {
        Some(Priority::High) => "●".red(),
        Some(Priority::Medium) => "●".yellow(),
        Some(Priority::Low) => "●".green(),
        None => " ".normal(),
    }
}

fn assignee_text(task: &Task) -> ColoredString {
    if task.assignee.is_empty() {
        "Unassigned".dimmed()
    } else {
        task.assignee.as_str().cyan()
    }
}

fn print_card(task: &Task) {
    println!("  {} {}  {}", priority_dot(task.priority), task.title.bold(), task.id.dimmed());
    if !task.description.is_empty() {
        println!("    {}", task.description);
    }
    let tags: Vec<String> = task.tags.iter().map(|t| format!("#{}", t)).collect();
    println!("    {}  {}", assignee_text(task), tags.join(" ").magenta());
}

fn print_detail(task: &Task) {
    println!("{}", task.title.bold());
    println!("  {:<10} {}", "id", task.id);
    println!("  {:<10} {}", "status", status_label(task.status));
    println!(
        "  {:<10} {} {}",
        "priority",
        priority_dot(task.priority),
        task.priority.map(|p| p.as_str()).unwrap_or("none")
    );
    println!("  {:<10} {}", "assignee", assignee_text(task));
    if !task.tags.is_empty() {
        println!("  {:<10} {}", "tags", task.tags.join(", "));
    }
    println!("  {:<10} {}", "created", task.created_at.format("%A, %B %-d, %Y"));
    if let Some(due) = task.due_date {
        println!("  {:<10} {}", "due", due.format("%A, %B %-d, %Y"));
    }
    if !task.description.is_empty() {
        println!();
        println!("{}", task.description);
    }
}
