use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use chatconnect::action::Action;
use chatconnect::api::{ApiClient, ApiError, ProfileTarget};
use chatconnect::config::Config;
use chatconnect::fetch::{Fetcher, SearchOutcome};
use chatconnect::logging::init_tracing;
use chatconnect::navigation::{relationship, SearchBox, SearchView};
use chatconnect::session::{self, FileStore, KeyValueStore, MemoryStore, SecureString};
use chatconnect::store::{AppState, Store};

#[derive(Parser, Debug)]
#[command(name = "chatconnect")]
#[command(version, about = "Chat Connect client: profiles, search, friend requests")]
struct Cli {
    /// Config file (default: <config dir>/chatconnect/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store an issued access token for USER
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        token: String,
    },
    /// Forget the stored session
    Logout,
    /// Print the logged-in user
    Whoami,
    /// Search users once
    Search { query: Vec<String> },
    /// Read search-box text from stdin, one line per edit, and print results as they settle
    LiveSearch,
    /// Show a profile (own profile when USERNAME is omitted)
    Profile {
        username: Option<String>,
        /// Open the about tab
        #[arg(long)]
        about: bool,
    },
    /// List incoming friend requests
    Requests,
    /// Accept a friend request
    Accept { username: String },
    /// Decline a friend request
    Decline { username: String },
    /// Send a friend request
    Add { username: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let kv: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let path = config
            .session
            .path
            .clone()
            .unwrap_or_else(FileStore::default_path);
        Arc::new(FileStore::open(path).context("opening session store")?)
    };

    let store = Store::new(AppState::with_session(session::restore(kv.as_ref())));
    let api = ApiClient::new(&config.api).context("building API client")?;
    let fetcher = Fetcher::new(api, store.clone());
    let with_hint = |e: ApiError| explain(e, &config.api.base_url);

    match cli.command {
        Command::Login { user, token } => {
            session::persist_login(kv.as_ref(), &store, &user, SecureString::new(token))?;
            println!("Logged in as {}", user);
        }
        Command::Logout => {
            session::logout(kv.as_ref(), &store)?;
            println!("Logged out");
        }
        Command::Whoami => match store.select(|s| s.login.user.clone()) {
            Some(user) => println!("{}", user),
            None => println!("Not logged in"),
        },
        Command::Search { query } => {
            require_login(&store)?;
            match fetcher.search_users(&query.join(" ")).await {
                SearchOutcome::Users(users) if users.is_empty() => println!("No users found"),
                SearchOutcome::Users(users) => {
                    for user in users {
                        println!("{}", user.username);
                    }
                }
                SearchOutcome::Failed { message } => bail!(message),
            }
        }
        Command::LiveSearch => {
            require_login(&store)?;
            live_search(fetcher, config.search.debounce()).await?;
        }
        Command::Profile { username, about } => {
            let me = require_login(&store)?;
            let target = match &username {
                Some(name) if *name != me => ProfileTarget::User(name.clone()),
                _ => ProfileTarget::Own,
            };
            store.dispatch(Action::EnterProfile);

            let profile = if about {
                fetcher.show_about(target).await
            } else {
                fetcher.get_user_profile(target).await
            };
            let profile = match profile {
                Ok(profile) => profile,
                Err(e) if store.select(|s| s.profile.can_retry_about()) => {
                    bail!("{} (run again to retry)", e)
                }
                Err(e) => return Err(with_hint(e)),
            };

            let shown_name = username.unwrap_or_else(|| me.clone());
            println!("{} ({})", profile.name, shown_name);
            if let Some(picture) = &profile.profile_picture {
                println!("  picture: {}", config.api.asset_url(picture));
            }
            println!("  friends: {}", profile.friends.len());
            let sent = store.select(|s| s.friends.sent.clone());
            if let Some(label) = relationship(&me, &shown_name, &profile.friends, &sent).action_label() {
                println!("  [{}]", label);
            }
            println!("  tab: {:?}", store.select(|s| s.profile.active_tab));
        }
        Command::Requests => {
            require_login(&store)?;
            fetcher.load_notifications().await.map_err(with_hint)?;
            let friends = store.select(|s| s.friends.clone());
            if friends.requests.is_empty() {
                println!("No pending friend requests");
            }
            for request in friends.requests {
                println!("{}", request.username);
            }
        }
        Command::Accept { username } => {
            require_login(&store)?;
            fetcher.accept_request(&username).await.map_err(with_hint)?;
            println!("Accepted {}", username);
        }
        Command::Decline { username } => {
            require_login(&store)?;
            fetcher.cancel_request(&username).await.map_err(with_hint)?;
            println!("Declined {}", username);
        }
        Command::Add { username } => {
            require_login(&store)?;
            fetcher.send_request(&username).await.map_err(with_hint)?;
            println!("Friend request sent to {}", username);
        }
    }

    Ok(())
}

/// Point at the configured server when it could not be reached at all.
fn explain(err: ApiError, base_url: &str) -> anyhow::Error {
    if err.is_transport() {
        anyhow::anyhow!("{} (is the API reachable at {}?)", err, base_url)
    } else {
        err.into()
    }
}

fn require_login(store: &Store) -> Result<String> {
    match store.select(|s| s.login.user.clone()) {
        Some(user) => Ok(user),
        None => bail!("Not logged in; run `chatconnect login` first"),
    }
}

async fn live_search(fetcher: Fetcher, quiet: std::time::Duration) -> Result<()> {
    let mut search = SearchBox::new(fetcher, quiet);
    let mut view = search.subscribe_view();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(text) => search.on_input(&text),
                    None => break,
                }
            }
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                print_view(search.query(), &view.borrow_and_update());
            }
        }
    }

    // Let a search that is already waiting out its quiet period finish.
    if search.is_searching() && view.changed().await.is_ok() {
        print_view(search.query(), &view.borrow_and_update());
    }
    Ok(())
}

fn print_view(query: &str, view: &SearchView) {
    match view {
        SearchView::Idle => {}
        SearchView::Results(users) if users.is_empty() => println!("{}: (no users)", query),
        SearchView::Results(users) => {
            println!("{}:", query);
            for user in users {
                println!("  {}", user.username);
            }
        }
        SearchView::Failed(message) => println!("{}: {}", query, message),
    }
}
