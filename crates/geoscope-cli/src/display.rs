//! Vertical card display for enriched article records.

use std::collections::BTreeSet;

use geoscope_core::ArticleRecord;

const MAX_LIST_ITEMS: usize = 10;

/// Render one enriched record as a grouped, human-readable card.
pub fn print_card(article: &ArticleRecord) {
    println!("━━━ {} ━━━", article.id);

    if let Some(title) = &article.title {
        println!("  title        {title}");
    }
    if let Some(url) = &article.url {
        println!("  url          {url}");
    }
    if let Some(published_at) = &article.published_at {
        println!("  published    {}", published_at.to_rfc3339());
    }

    println!("── regions ──");
    print_set("provinces", &article.province_list);
    print_set("cities", &article.city_list);
    print_set("districts", &article.district_list);

    println!("── entities ──");
    print_set("locations", &article.entities.locations);
    print_set("institutes", &article.entities.institutes);
    print_set("candidates", &article.geocode_candidates);

    println!("── geocoding ──");
    for (name, point) in &article.resolved_points {
        println!(
            "  {name}  {:.6}, {:.6}",
            point.longitude, point.latitude
        );
    }
    if article.resolved_points.is_empty() {
        println!("  (no resolved points)");
    }

    println!("── classification ──");
    println!(
        "  scale        {}",
        article
            .scale
            .map(|s| s.as_u8().to_string())
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "  span         {}",
        article
            .span
            .map(|s| format!("{s:.6}"))
            .unwrap_or_else(|| "-".into())
    );

    if !article.debug.is_empty() {
        println!("── debug ──");
        for entry in &article.debug {
            println!("  rejected parent city: {entry}");
        }
    }
    println!();
}

fn print_set(label: &str, values: &BTreeSet<String>) {
    if values.is_empty() {
        return;
    }
    let shown: Vec<&str> = values.iter().take(MAX_LIST_ITEMS).map(|s| s.as_str()).collect();
    let suffix = if values.len() > MAX_LIST_ITEMS {
        format!(" … ({} more)", values.len() - MAX_LIST_ITEMS)
    } else {
        String::new()
    };
    println!("  {label:<12} {}{suffix}", shown.join("、"));
}
