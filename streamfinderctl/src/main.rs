//! # streamfinderctl
//!
//! Terminal front end for streamfinder: discover and search listings with
//! continuation, genre vocabularies, title details with per-country
//! watch-provider availability, and external identifiers.

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use streamfinder_config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use streamfinder_core::filters::navigation::{
    GENRES, LANGUAGE, MEDIA_TYPE, PAGE, PROVIDERS, REGION, SORT_BY,
};
use streamfinder_core::{
    BrowseSession, FilterUpdate, MetadataGateway, NavigationParams, TmdbGateway,
};
use streamfinder_model::{MediaKind, RegionCode};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "streamfinderctl")]
#[command(about = "Browse TMDB listings and watch-provider availability")]
struct Cli {
    /// Path to a streamfinder.toml file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Environment file to load instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Discover titles by filters
    Discover {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Search titles by free text
    Search {
        /// Text to search for
        #[arg(value_parser = parse_search_text)]
        query: String,
        /// movie or tv
        #[arg(long, value_parser = parse_media_kind)]
        media_type: Option<MediaKind>,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Restore a browse view from its navigation query string
    Browse {
        /// e.g. "mediaType=tv&providers=8,337&sortBy=vote_average.desc"
        #[arg(long)]
        params: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// List the genre vocabulary
    Genres {
        #[arg(long, value_parser = parse_media_kind, default_value = "movie")]
        media_type: MediaKind,
    },
    /// Show a title with its streaming, rental and purchase providers
    Detail {
        id: u64,
        #[arg(long, value_parser = parse_media_kind, default_value = "movie")]
        media_type: MediaKind,
        /// Only list providers available in this country
        #[arg(long, value_parser = parse_region)]
        region: Option<RegionCode>,
    },
    /// Show IMDb, TVDB and Wikidata identifiers of a title
    Ids {
        id: u64,
        #[arg(long, value_parser = parse_media_kind, default_value = "movie")]
        media_type: MediaKind,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// movie or tv
    #[arg(long)]
    media_type: Option<String>,
    /// Comma-separated provider ids (any of)
    #[arg(long)]
    providers: Option<String>,
    /// Original language (ISO-639-1)
    #[arg(long)]
    language: Option<String>,
    /// Watch region (ISO-3166-1)
    #[arg(long)]
    region: Option<String>,
    /// Comma-separated genre ids
    #[arg(long)]
    genres: Option<String>,
    /// Sort key, e.g. vote_average.desc
    #[arg(long)]
    sort: Option<String>,
    /// First page to load
    #[arg(long)]
    page: Option<u32>,
}

impl FilterArgs {
    fn navigation(&self) -> NavigationParams {
        [
            (MEDIA_TYPE, self.media_type.clone()),
            (PROVIDERS, self.providers.clone()),
            (LANGUAGE, self.language.clone()),
            (REGION, self.region.clone()),
            (GENRES, self.genres.clone()),
            (SORT_BY, self.sort.clone()),
            (PAGE, self.page.map(|page| page.to_string())),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct PagingArgs {
    /// Number of pages to load through continuation
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

fn parse_media_kind(raw: &str) -> Result<MediaKind, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_region(raw: &str) -> Result<RegionCode, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_search_text(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("search text must not be empty".to_string());
    }
    Ok(raw.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
    });
    let ConfigLoad { config, warnings } =
        loader.load().context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let gateway = TmdbGateway::new(settings::gateway_settings(&config))
        .context("failed to build HTTP client")?;
    let mut session = BrowseSession::new(gateway, settings::filter_defaults(&config));
    let image_base = config.tmdb.image_base_url.as_str();

    match cli.command {
        Command::Discover { filters, paging } => {
            let query = filters.navigation().to_query_string();
            session
                .sync_from_navigation(&query)
                .await
                .context("discover request failed")?;
            load_pages(&mut session, paging).await?;
            output::listing(&session, image_base, cli.json)
        }
        Command::Search {
            query,
            media_type,
            paging,
        } => {
            let mut update = FilterUpdate::new().query(query);
            if let Some(kind) = media_type {
                update = update.media_kind(kind);
            }
            session.apply(update).await.context("search request failed")?;
            load_pages(&mut session, paging).await?;
            output::listing(&session, image_base, cli.json)
        }
        Command::Browse { params, paging } => {
            session
                .sync_from_navigation(params.trim_start_matches('?'))
                .await
                .context("browse request failed")?;
            load_pages(&mut session, paging).await?;
            output::listing(&session, image_base, cli.json)
        }
        Command::Genres { media_type } => {
            let genres = session
                .load_genres(media_type)
                .await
                .context("failed to fetch genres")?;
            output::genres(media_type, &genres, cli.json)
        }
        Command::Detail {
            id,
            media_type,
            region,
        } => {
            let detail = session
                .detail(media_type, id)
                .await
                .with_context(|| format!("failed to fetch {media_type} {id}"))?;
            output::detail(&detail, region.as_ref(), image_base, cli.json)
        }
        Command::Ids { id, media_type } => {
            let ids = session
                .external_ids(media_type, id)
                .await
                .with_context(|| format!("failed to fetch ids for {media_type} {id}"))?;
            output::external_ids(&ids, cli.json)
        }
    }
}

/// Pulls continuation pages until `paging.pages` are loaded or the listing
/// is exhausted.
async fn load_pages<G: MetadataGateway>(
    session: &mut BrowseSession<G>,
    paging: PagingArgs,
) -> Result<()> {
    session.refresh().await?;
    let mut loaded = 1;
    while loaded < paging.pages {
        if !session.load_more().await.context("continuation failed")? {
            break;
        }
        loaded += 1;
    }
    Ok(())
}
