//! Panel Catalog Example
//!
//! Decodes every reference SKU and prints its resolved geometry and
//! thermal windows.
//!
//! Run with: cargo run --example panel_info

use epd_specs::{catalog, CogFamily, FilmKind, PanelProfile, PanelSku, UpdateMode};

/// Pick a plausible COG family for a SKU so the example can resolve it.
fn cog_for(sku: PanelSku) -> CogFamily {
    let film = FilmKind::from_code(sku.film_code()).unwrap_or(FilmKind::Standard);
    let large = matches!(sku.size_code(), 969 | 1198);
    match (film, large) {
        (FilmKind::Bwry, true) => CogFamily::BwryLarge,
        (FilmKind::Bwry, false) => CogFamily::BwrySmall,
        (FilmKind::Fast, _) => CogFamily::FastSmall,
        (FilmKind::Wide, _) => CogFamily::WideSmall,
        (_, true) => CogFamily::NormalLarge,
        (_, false) => CogFamily::NormalSmall,
    }
}

fn main() {
    println!("Supported panel catalog");
    println!("=======================\n");

    for &sku in catalog::ALL {
        let profile = match PanelProfile::resolve(sku, cog_for(sku)) {
            Ok(profile) => profile,
            Err(err) => {
                println!("{sku}: {err}");
                continue;
            }
        };

        println!("{sku}  ({profile})");
        println!(
            "  {} x {} px, {:.0} ppi, {} colours",
            profile.columns,
            profile.rows,
            profile.pixels_per_inch(),
            profile.film.color_count()
        );
        println!(
            "  {} plane(s) of {} bytes, stride {} bytes{}",
            profile.plane_count,
            profile.plane_bytes,
            profile.row_stride,
            if profile.is_split() { ", split" } else { "" }
        );

        let (low, high) = profile.film.normal_window();
        print!("  normal update {low}..={high} C");
        if let Some((fast_low, fast_high)) = profile.film.fast_window() {
            print!(", fast update {fast_low}..={fast_high} C");
        }
        println!();

        let at_freezing = profile.film.resolve_update(UpdateMode::Fast, -5);
        println!("  fast request at -5 C resolves to {at_freezing:?}\n");
    }
}
