use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use roomfinder::{
    AppState, Config,
    config::DEFAULT_STORE_PATH,
    core::{
        Facet, ListingFilter, ListingSource, LoginForm, RegisterForm, SortOrder, Tab,
        db::SqliteStore,
        filter::result_count_label,
        model::ListingId,
        source::parse_room_param,
    },
};

#[derive(Parser)]
#[command(name = "roomfinder")]
#[command(about = "Browse, search and manage rental room listings")]
struct Cli {
    /// SQLite file backing client storage
    #[arg(long, value_name = "PATH", env = "ROOMFINDER_STORE", default_value = DEFAULT_STORE_PATH, global = true)]
    store: PathBuf,

    /// Simulated network delay for loading a room
    #[arg(long, value_name = "MS", default_value_t = 1000, global = true)]
    fetch_delay_ms: u64,

    /// Image auto-advance interval
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    carousel_secs: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Open the login screen in register mode
    #[arg(long)]
    register: bool,

    /// Open a room detail page on start
    #[arg(long, value_name = "ID")]
    room: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the listings visible on a dashboard tab
    List {
        #[arg(long, default_value = "all")]
        tab: Tab,

        /// Case-insensitive text searched in title, location and description
        #[arg(long, default_value = "")]
        query: String,

        /// Amenity or location every listing must have; repeatable
        #[arg(long = "facet", value_name = "NAME")]
        facets: Vec<Facet>,

        /// none, price-asc, price-desc, rating or recent
        #[arg(long, default_value = "none")]
        sort: SortOrder,
    },
    /// Load one room the way the detail page does
    Show {
        #[arg(value_name = "ROOM")]
        room: String,
    },
    /// Sign in with any non-empty email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the signed-in user
    Logout,
    /// Add a room to favorites, or remove it if already there
    Favorite {
        #[arg(value_name = "ID")]
        id: ListingId,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            store_path: self.store.clone(),
            fetch_delay: Duration::from_millis(self.fetch_delay_ms),
            carousel_interval: Duration::from_secs(self.carousel_secs.max(1)),
            register: self.register,
            initial_room: self.room.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.config();
    match args.command {
        Some(command) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_command(command, config))
        }
        None => launch_gui(config),
    }
}

#[cfg(feature = "gui")]
fn launch_gui(config: Config) -> anyhow::Result<()> {
    info!(store = ?config.store_path, "starting desktop application");
    roomfinder::gui::run(config)
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_config: Config) -> anyhow::Result<()> {
    bail!("built without the `gui` feature; use one of the subcommands")
}

async fn run_command(command: Command, config: Config) -> anyhow::Result<()> {
    info!(store = ?config.store_path, "running headless command");
    let store = SqliteStore::open(&config.store_path)
        .await
        .with_context(|| format!("opening {:?}", config.store_path))?;
    let mut state = AppState::new(Arc::new(store.clone()), config);
    let result = dispatch(command, &mut state).await;
    store.close().await?;
    result
}

async fn dispatch(command: Command, state: &mut AppState) -> anyhow::Result<()> {
    let signed_in = state.activate().await?;
    match command {
        Command::List {
            tab,
            query,
            facets,
            sort,
        } => {
            if !signed_in {
                bail!("not signed in; run `roomfinder login` first");
            }
            let filter = ListingFilter {
                tab,
                query,
                facets,
                sort,
            };
            let visible = state.filtered(&filter);
            println!("{}", result_count_label(visible.len()));
            for listing in visible {
                let favorite = if state.is_favorite(listing.id) { " ♥" } else { "" };
                println!(
                    "{:>14}  {}  ₹{}/month  {}{}",
                    listing.id.0, listing.title, listing.rent, listing.location, favorite
                );
            }
            Ok(())
        }
        Command::Show { room } => show(state, &room, signed_in).await,
        Command::Login { email, password } => {
            let user = LoginForm { email, password }.validate()?;
            state.sign_in(user).await?;
            print_signed_in(state);
            Ok(())
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
            };
            state.sign_in(form.validate()?).await?;
            print_signed_in(state);
            Ok(())
        }
        Command::Logout => {
            state.sign_out().await?;
            println!("Signed out");
            Ok(())
        }
        Command::Favorite { id } => {
            if !signed_in {
                bail!("not signed in; run `roomfinder login` first");
            }
            let now_favorite = state.toggle_favorite(id).await;
            if now_favorite {
                println!("Added {id} to favorites");
            } else {
                println!("Removed {id} from favorites");
            }
            Ok(())
        }
    }
}

async fn show(state: &AppState, room: &str, signed_in: bool) -> anyhow::Result<()> {
    if !signed_in {
        bail!("not signed in; run `roomfinder login` first");
    }
    let detail = match parse_room_param(room) {
        Some(id) => state.listing_source().fetch_listing(id).await?,
        None => None,
    };
    let Some(detail) = detail else {
        bail!("room {room:?} not found");
    };

    let listing = &detail.listing;
    println!("{} ({})", listing.title, listing.location);
    println!("₹{}/month, deposit ₹{}", listing.rent, listing.deposit);
    if let Some(rating) = listing.rating {
        println!("Rating {rating:.1} from {} reviews", listing.reviews.unwrap_or(0));
    }
    println!("{}", listing.description);
    let amenities: Vec<&str> = listing.amenities.iter().map(|a| a.name()).collect();
    println!("Amenities: {}", amenities.join(", "));
    println!(
        "Hosted by {} ({}% response rate, responds {})",
        detail.owner.name, detail.owner.response_rate, detail.owner.response_time
    );
    if state.is_owner(listing) {
        println!("You own this listing");
    }
    Ok(())
}

fn print_signed_in(state: &AppState) {
    if let Some(user) = state.user() {
        println!("Signed in as {} <{}>", user.name, user.email);
    }
}
