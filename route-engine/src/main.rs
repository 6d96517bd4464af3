use std::sync::Arc;

use route_engine::RouteEngine;
use route_engine::domain::{DurationEstimate, SelectedCity, TransportSegment, TripId};
use route_engine::enrich::{
    CachedImageSource, HttpImageClient, ImageCacheConfig, ImageClientConfig, fetch_city_images,
};
use route_engine::store::{DebouncedWriter, JsonFileStore};
use tracing_subscriber::EnvFilter;

fn describe(duration: &DurationEstimate) -> String {
    match duration {
        DurationEstimate::Exact(d) => format!("{}h{:02}", d.num_hours(), d.num_minutes() % 60),
        DurationEstimate::Approximate(d) => {
            format!("~{}h{:02}", d.num_hours(), d.num_minutes() % 60)
        }
        DurationEstimate::Bracket { min, max } => {
            format!("{}-{}h", min.num_hours(), max.num_hours())
        }
        DurationEstimate::Unknown => "?".to_string(),
    }
}

fn print_segment(segment: &TransportSegment) {
    let distance = segment
        .distance_km
        .map(|d| format!("{d:.0} km"))
        .unwrap_or_else(|| "? km".to_string());
    println!(
        "  {} -> {}: {} {} ({})",
        segment.from,
        segment.to,
        segment.mode,
        describe(&segment.duration),
        distance
    );
    if !segment.hub_options.is_empty() {
        println!("      via {}", segment.hub_options.join(", "));
    }
    for violation in &segment.violations {
        println!("      ! {violation}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let selected: Vec<SelectedCity> = std::env::args().skip(1).map(SelectedCity::new).collect();
    if selected.is_empty() {
        eprintln!("Usage: route-engine <city> [<city> ...]");
        eprintln!("  ROUTE_ORIGIN     home city (optional)");
        eprintln!("  ROUTE_STORE_DIR  directory to save the route in (optional)");
        eprintln!("  IMAGE_API_KEY    fetch city images (optional)");
        std::process::exit(2);
    }

    let origin = std::env::var("ROUTE_ORIGIN").ok();
    let engine = RouteEngine::with_defaults();
    let state = engine.compute_initial_route(&selected, origin.as_deref());

    println!("Route:");
    for (i, entry) in state.entries().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, entry.city, entry.country);
    }
    if engine.detect_inefficiency(&state) {
        println!("  (route doubles back; optimizing may help)");
    }

    let home = engine.home_legs(&state);
    println!();
    println!("Transport:");
    if let Some(outbound) = home.first() {
        print_segment(outbound);
    }
    for segment in engine.estimate_segments(&state) {
        print_segment(&segment);
    }
    if let Some(inbound) = home.get(1) {
        print_segment(inbound);
    }

    if let Ok(api_key) = std::env::var("IMAGE_API_KEY") {
        let client = HttpImageClient::new(ImageClientConfig::new(api_key))?;
        let source = CachedImageSource::new(client, &ImageCacheConfig::default());
        let cities: Vec<_> = state
            .entries()
            .iter()
            .map(|e| (e.city.clone(), e.country.clone()))
            .collect();

        println!();
        println!("Images:");
        let window = engine.config().enrichment_window;
        for image in fetch_city_images(&source, &cities, window).await {
            println!("  {}: {}", image.city, image.url.as_deref().unwrap_or("-"));
        }
    }

    if let Ok(dir) = std::env::var("ROUTE_STORE_DIR") {
        let trip = TripId::parse(&std::env::var("ROUTE_TRIP_ID").unwrap_or_else(|_| "default".to_string()))?;
        let store = Arc::new(JsonFileStore::new(&dir));
        let path = store.path_for(&trip);
        let writer = DebouncedWriter::spawn(store, trip, engine.config().save_debounce());
        writer.update(state);
        writer.shutdown().await?;
        println!();
        println!("Saved to {}", path.display());
    }

    Ok(())
}
