use anyhow::Result;
use serde_json::{Map, Value, json};
use streamfinder_core::{AvailabilityIndex, BrowseSession, MetadataGateway, TitleDetail};
use streamfinder_model::{
    BackdropSize, ExternalIds, Genre, LogoSize, MediaKind, MediaSummary, MonetizationCategory,
    PosterSize, ProviderAvailability, RegionCode, image_url,
};

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn year(item: &MediaSummary) -> String {
    item.release_year()
        .map(|year| year.to_string())
        .unwrap_or_else(|| "----".to_string())
}

pub fn listing<G: MetadataGateway>(
    session: &BrowseSession<G>,
    image_base: &str,
    json: bool,
) -> Result<()> {
    let results = session.results();
    let navigation = session.navigation().to_query_string();

    if json {
        let items: Vec<Value> = results
            .items()
            .iter()
            .map(|item| -> Result<Value, serde_json::Error> {
                let mut value = serde_json::to_value(item)?;
                value["poster_url"] = json!(image_url(
                    image_base,
                    PosterSize::default(),
                    item.poster_path.as_deref()
                ));
                Ok(value)
            })
            .collect::<Result<_, _>>()?;
        return print_json(&json!({
            "last_page": results.last_page(),
            "total_pages": results.total_pages(),
            "total_results": results.total_results(),
            "exhausted": results.is_exhausted(),
            "navigation": navigation,
            "results": items,
        }));
    }

    for item in results.items() {
        println!(
            "{:>9}  {}  {:>4}  {}",
            item.id,
            year(item),
            item.rating_label(),
            item.display_title
        );
    }
    if results.is_empty() {
        println!("No results");
    }
    println!();
    println!(
        "{} titles, page {} of {}{}",
        results.len(),
        results.last_page().unwrap_or(0),
        results.total_pages(),
        if results.is_exhausted() { " (end)" } else { "" }
    );
    println!("navigation: ?{navigation}");
    Ok(())
}

pub fn genres(kind: MediaKind, genres: &[Genre], json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::to_value(genres)?);
    }
    println!("{} genres:", kind.label());
    for genre in genres {
        println!("{:>6}  {}", genre.id, genre.name);
    }
    Ok(())
}

fn provider_line(provider: &ProviderAvailability, image_base: &str) -> String {
    let logo = image_url(image_base, LogoSize::default(), provider.logo_path.as_deref())
        .map(|url| format!("  {url}"))
        .unwrap_or_default();
    format!(
        "  {:>5}  {} ({} countries){logo}",
        provider.provider_id,
        provider.provider_name,
        provider.country_count()
    )
}

fn providers_for<'a>(
    index: &'a AvailabilityIndex,
    region: Option<&'a RegionCode>,
    category: MonetizationCategory,
) -> Vec<&'a ProviderAvailability> {
    match region {
        Some(region) => index.providers_in(region.as_str(), category).collect(),
        None => index.providers(category).iter().collect(),
    }
}

pub fn detail(
    detail: &TitleDetail,
    region: Option<&RegionCode>,
    image_base: &str,
    json: bool,
) -> Result<()> {
    let index = detail.availability_index();

    if json {
        let mut availability = Map::new();
        for category in MonetizationCategory::ALL {
            availability.insert(
                category.as_str().to_string(),
                serde_json::to_value(providers_for(&index, region, category))?,
            );
        }
        return print_json(&json!({
            "detail": detail.detail,
            "region": region.map(RegionCode::as_str),
            "availability": availability,
        }));
    }

    let media = &detail.detail;
    let summary = &media.summary;
    println!(
        "{} ({})  {}",
        summary.display_title,
        year(summary),
        summary.rating_label()
    );
    if let Some(runtime) = media.runtime_label() {
        println!("Runtime: {runtime}");
    }
    if let Some(seasons) = media.number_of_seasons {
        println!("Seasons: {seasons}");
    }
    if !media.genres.is_empty() {
        let names: Vec<&str> = media.genres.iter().map(|g| g.name.as_str()).collect();
        println!("Genres: {}", names.join(", "));
    }
    if let Some(url) = image_url(image_base, PosterSize::W500, summary.poster_path.as_deref()) {
        println!("Poster: {url}");
    }
    if let Some(url) = image_url(
        image_base,
        BackdropSize::default(),
        media.backdrop_path.as_deref(),
    ) {
        println!("Backdrop: {url}");
    }
    if let Some(overview) = media.overview.as_deref().filter(|o| !o.is_empty()) {
        println!();
        println!("{overview}");
    }

    println!();
    if index.is_empty() {
        println!("No watch providers listed");
        return Ok(());
    }
    for category in MonetizationCategory::ALL {
        let providers = providers_for(&index, region, category);
        match region {
            Some(region) => println!("{} in {region} ({})", category.label(), providers.len()),
            None => println!("{} ({})", category.label(), providers.len()),
        }
        for provider in providers {
            println!("{}", provider_line(provider, image_base));
        }
    }
    Ok(())
}

pub fn external_ids(ids: &ExternalIds, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::to_value(ids)?);
    }
    println!("TMDB:     {}", ids.id);
    println!("IMDb:     {}", ids.imdb_id.as_deref().unwrap_or("-"));
    if let Some(url) = ids.imdb_url() {
        println!("          {url}");
    }
    println!(
        "TVDB:     {}",
        ids.tvdb_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("Wikidata: {}", ids.wikidata_id.as_deref().unwrap_or("-"));
    Ok(())
}
