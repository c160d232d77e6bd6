use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Subcommand};
use filedock_runtime::session::{AuthData, Session, SessionStore, UserProfile};
use log::info;

use crate::commands::{CommandResult, finish};

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub action: Option<SessionAction>,
}

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Print the stored session (default)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store a token and user profile
    Login {
        #[arg(long)]
        token: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },

    /// Replace the access token, keeping the user
    Refresh {
        #[arg(long)]
        token: String,
    },

    /// Forget the stored session
    Logout,
}

pub fn run(args: SessionArgs, store: &SessionStore, session: &mut Session) -> ExitCode {
    finish("session", execute(args, store, session))
}

fn execute(args: SessionArgs, store: &SessionStore, session: &mut Session) -> CommandResult<ExitCode> {
    let action = args.action.unwrap_or(SessionAction::Show { json: false });

    match action {
        SessionAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session)?);
            } else {
                print_session(session, store);
            }
        }
        SessionAction::Login {
            token,
            id,
            username,
            nickname,
            role,
        } => {
            session.set_auth(AuthData {
                access_token: token,
                user: UserProfile {
                    id,
                    username,
                    nickname,
                    role,
                },
            });
            save(store, session)?;
            info!("[session] logged in, saved to {}", store.path().display());
            print_session(session, store);
        }
        SessionAction::Refresh { token } => {
            if !session.is_authenticated() {
                eprintln!("[session] not logged in");
                return Ok(ExitCode::from(1));
            }
            session.update_access_token(token);
            save(store, session)?;
        }
        SessionAction::Logout => {
            session.clear();
            store
                .clear()
                .with_context(|| format!("cannot remove {}", store.path().display()))?;
            println!("logged out");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn save(store: &SessionStore, session: &Session) -> CommandResult<()> {
    store
        .save(session)
        .with_context(|| format!("cannot write {}", store.path().display()))
}

fn print_session(session: &Session, store: &SessionStore) {
    println!("file:      {}", store.path().display());

    let Some(user) = session.user.as_ref().filter(|_| session.is_authenticated()) else {
        println!("status:    logged out");
        return;
    };

    println!("status:    logged in");
    println!("user:      {} ({})", user.username, user.id);
    if let Some(nick) = &user.nickname {
        println!("nickname:  {}", nick);
    }
    println!("role:      {}", user.role.as_deref().unwrap_or("-"));
    println!("admin:     {}", session.is_admin());
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
