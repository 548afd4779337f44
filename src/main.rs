use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotilink::{cli, config, error, spotify::search::SearchKind};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify
    Auth,

    /// Forget the stored session
    Logout,

    /// Run the local login portal
    Serve,

    /// Show the signed-in user's profile
    Whoami,

    /// Show your most listened artists or tracks
    Top(TopOptions),

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// Search the Spotify catalog
    Search(SearchOptions),

    /// Show, create or update playlists
    Playlist(PlaylistOptions),

    /// Load a playlist into the player queue
    Queue(QueueOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    #[command(subcommand)]
    pub command: TopSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TopSubcommand {
    /// Top artists
    Artists,
    /// Top tracks
    Tracks,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only playlists you own
    #[clap(long)]
    pub owned: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// What to search for
    #[clap(value_enum)]
    pub kind: SearchKind,

    /// Search query
    pub query: String,

    /// Maximum number of results
    #[clap(long)]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Show a playlist and its tracks
    Show { id: String },

    /// Create a playlist
    Create(PlaylistFields),

    /// Update an existing playlist
    Update {
        id: String,
        #[clap(flatten)]
        fields: PlaylistFields,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistFields {
    /// Playlist title
    #[clap(long)]
    pub title: Option<String>,

    /// Make the playlist public; `--public false` makes it private
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    pub public: Option<bool>,

    /// Playlist description
    #[clap(long)]
    pub description: Option<String>,

    /// Track URI to include; can be repeated
    #[clap(long = "song")]
    pub songs: Vec<String>,

    /// Search query whose best track is included; can be repeated
    #[clap(long)]
    pub find: Vec<String>,

    /// JPEG file to use as cover
    #[clap(long)]
    pub image: Option<PathBuf>,
}

impl From<PlaylistFields> for cli::PlaylistInput {
    fn from(fields: PlaylistFields) -> Self {
        cli::PlaylistInput {
            title: fields.title,
            public: fields.public,
            description: fields.description,
            songs: fields.songs,
            find: fields.find,
            image: fields.image,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct QueueOptions {
    /// Playlist id
    pub id: String,

    /// Position of the first track (1-based)
    #[clap(long, default_value_t = 1)]
    pub start: usize,

    /// Tracks to skip forward (negative steps back)
    #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
    pub skip: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Logout => cli::logout().await,
        Command::Serve => cli::serve().await,
        Command::Whoami => cli::whoami().await,
        Command::Top(opt) => match opt.command {
            TopSubcommand::Artists => cli::top_artists().await,
            TopSubcommand::Tracks => cli::top_tracks().await,
        },
        Command::Playlists(opt) => cli::playlists(opt.owned).await,
        Command::Search(opt) => cli::search(opt.kind, opt.query, opt.limit).await,
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Show { id } => cli::playlist_show(id).await,
            PlaylistSubcommand::Create(fields) => cli::playlist_create(fields.into()).await,
            PlaylistSubcommand::Update { id, fields } => {
                cli::playlist_update(id, fields.into()).await
            }
        },
        Command::Queue(opt) => cli::queue(opt.id, opt.start, opt.skip).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
