use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};

use studio_session::domain::Identity;
use studio_session::utils::Config;
use studio_session::{Session, SessionEvent};

#[derive(Parser)]
#[command(name = "studio-session", version, about = "Sign in to the studio API and keep the session alive")]
struct Cli {
    /// Token store file, overrides TOKEN_STORE_PATH.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with username and password.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an OAuth authorization code.
    Social {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        code: String,
    },
    /// Show the current user as the server sees it.
    Me,
    /// Blacklist the refresh token and forget the session.
    Logout,
    /// Show the locally stored session.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::default().expect("Failed to load config");
    if let Some(path) = cli.store {
        config = config.with_token_store_path(path);
    }
    let session = Session::with_file_store(config).expect("Failed to build session");
    let mut events = session.subscribe();

    let result = run(&session, cli.command).await;

    while let Ok(event) = events.try_recv() {
        if let SessionEvent::Navigate { path } = event {
            eprintln!("session expired, sign in again ({path})");
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(session: &Session, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Login { username, password } => {
            let identity = session.login(&username, &password).await?;
            print_identity(&identity);
            if let Some(path) = session.take_redirect().await? {
                println!("continue at {path}");
            }
        }
        Command::Social { provider, code } => {
            let identity = session.login_social(&provider, &code).await?;
            print_identity(&identity);
        }
        Command::Me => {
            let user = session.me().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Logout => {
            session.logout().await?;
            println!("signed out");
        }
        Command::Status => match session.identity().await? {
            Some(identity) => {
                print_identity(&identity);
                if let Some(claims) = session.claims().await? {
                    if let Some(exp) = Utc.timestamp_opt(claims.exp, 0).single() {
                        println!("access token expires {exp}");
                    }
                }
                println!("refresh token usable: {}", session.is_authenticated().await?);
            }
            None => println!("not signed in"),
        },
    }
    Ok(())
}

fn print_identity(identity: &Identity) {
    println!("{} ({})", identity.name, identity.role);
    if !identity.groups.is_empty() {
        println!("groups: {}", identity.groups.join(", "));
    }
}
