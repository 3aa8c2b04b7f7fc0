use std::net::SocketAddr;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use rocks::config::{self, Settings};
use rocks::models::{AppState, CurrentUser, Role};
use rocks::security::{evaluate_access, rule_rows};
use rocks::services::{find_user, purge_expired_sessions};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    AppState::new(Settings::from_env())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

fn spawn_session_sweeper(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = purge_expired_sessions(&state);
            if removed > 0 {
                tracing::debug!(removed, "Expired sessions purged");
            }
        }
    });
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", "Failed to read custom stylesheet at".red(), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", "Invalid host/port format".red(), e);
            process::exit(1);
        }
    };

    spawn_session_sweeper(state.clone());
    let app = rocks::build_app(state);
    tracing::info!(%addr, "Starting server");
    println!("{} {}", "Web server running on".green(), format!("http://{}", addr).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", "Server error".red(), e);
                process::exit(1);
            }
            tracing::info!("Server stopped gracefully");
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                format!("Failed to bind to {}", addr).red(),
                e,
                "Please stop any process using this port, or start the server with a different --port value.".yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_users(state: &AppState, role: Option<Role>) {
    let mut table = new_table();
    table.set_header(vec!["Username", "Roles", "Authorities"]);
    let mut records: Vec<_> = state
        .users
        .values()
        .filter(|record| role.map_or(true, |r| record.has_role(r)))
        .collect();
    records.sort_by(|a, b| a.username.cmp(&b.username));
    for record in records {
        let principal = CurrentUser::from(record);
        table.add_row(vec![
            record.username.clone(),
            record.role_names().join(", "),
            principal.authorities().join(", "),
        ]);
    }
    println!("\n{table}\n");
}

fn print_rules(state: &AppState) {
    let chain = &state.security;
    let mut table = new_table();
    table.set_header(vec!["#", "Pattern", "Access"]);
    for row in rule_rows(chain) {
        table.add_row(row.to_vec());
    }
    println!("\n{table}\n");
    println!(
        "login page: {}  logout: {} -> {}",
        chain.form_login().login_page,
        chain.logout().logout_url,
        chain.logout().success_url
    );
}

fn check_access(state: &AppState, path: &str, username: Option<&str>) -> i32 {
    let principal = match username {
        Some(name) => match find_user(&state.users, name) {
            Some(record) => Some(CurrentUser::from(record)),
            None => {
                eprintln!("{} {}", "Unknown user:".red(), name);
                process::exit(2);
            }
        },
        None => None,
    };
    let report = evaluate_access(&state.security, path, principal.as_ref());
    let verdict = if report.granted {
        report.verdict().green().bold()
    } else {
        report.verdict().red().bold()
    };
    println!("{} {} for {} (rule: {})", verdict, report.path, report.principal, report.rule);
    report.exit_code()
}

#[derive(Parser)]
#[command(
    name = "rocks",
    author,
    version,
    about = "Role-gated web application with form login",
    long_about = r#"Rocks serves a small site whose /admin, /user and /shared areas are protected by role rules. Everything else is open.

Demo accounts (password "password"):
  privuser  ADMIN
  justuser  USER
  admin     USER, ADMIN

Examples:
  rocks serve --port 8080
  rocks rules
  rocks check-access /shared/report --user justuser
  rocks users list --role admin
"#,
    after_help = "Use `rocks <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to (defaults to HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Inspect the demo user store
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Evaluate the authorization rules for a path without starting the server
    #[command(long_about = "Print whether the rules grant access to PATH, for the given demo user or for an anonymous request. Exits 0 when granted, 1 when denied.")]
    CheckAccess {
        path: String,
        /// Evaluate as this demo user instead of anonymously
        #[arg(long)]
        user: Option<String>,
    },
    /// Print the ordered authorization rules
    Rules,
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List demo users", long_about = "List the in-memory demo users with their roles and granted authorities.")]
    List {
        /// Only users holding this role (ADMIN, USER or the ROLE_ form)
        #[arg(long)]
        role: Option<Role>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    match cli.command {
        None => {
            let state = build_state_from_env(None);
            start_server(state, &config::get_host(), config::get_port(), None).await;
        }
        Some(Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        }) => {
            let state = build_state_from_env(env_file.as_deref());
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(config::get_port);
            start_server(state, &host, port, stylesheet).await;
        }
        Some(Commands::Users { sub }) => {
            let state = build_state_from_env(None);
            match sub {
                UserCommands::List { role } => print_users(&state, role),
            }
        }
        Some(Commands::CheckAccess { path, user }) => {
            let state = build_state_from_env(None);
            let code = check_access(&state, &path, user.as_deref());
            if code != 0 {
                process::exit(code);
            }
        }
        Some(Commands::Rules) => {
            let state = build_state_from_env(None);
            print_rules(&state);
        }
    }
}
