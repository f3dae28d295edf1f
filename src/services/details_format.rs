// src/services/details_format.rs
// DOCUMENTATION: Display summaries for the details panel
// PURPOSE: Pure transforms over already-fetched place details

use reqwest::Url;

use crate::models::{DayHours, PlaceDetails, PlaceDetailsView, StarBreakdown};

/// Split "Monday: 9:00 AM – 5:00 PM" at the first colon followed by whitespace
fn split_weekday_entry(entry: &str) -> (&str, &str) {
    let separator = entry.char_indices().find(|&(i, c)| {
        c == ':'
            && entry[i + 1..]
                .chars()
                .next()
                .map_or(false, char::is_whitespace)
    });

    match separator {
        Some((i, _)) => (&entry[..i], entry[i + 1..].trim_start()),
        None => (entry, ""),
    }
}

/// Compress weekly hours
/// DOCUMENTATION: Day names are shortened to three characters and runs of
/// consecutive days with identical hours collapse into "First - Last".
pub fn summarize_opening_hours(weekday_text: &[String]) -> Vec<DayHours> {
    let mut summary: Vec<DayHours> = Vec::with_capacity(weekday_text.len());

    for entry in weekday_text {
        let (day, hours) = split_weekday_entry(entry);
        let day: String = day.chars().take(3).collect();

        match summary.last_mut() {
            Some(previous) if previous.hours == hours => {
                let first = match previous.days.split_once(" - ") {
                    Some((first, _)) => first.to_string(),
                    None => previous.days.clone(),
                };
                previous.days = format!("{} - {}", first, day);
            }
            _ => summary.push(DayHours {
                days: day,
                hours: hours.to_string(),
            }),
        }
    }

    summary
}

/// Star breakdown for a 0-5 rating rounded to the nearest half
/// Returns `None` for a missing or zero rating.
pub fn star_breakdown(rating: f32) -> Option<StarBreakdown> {
    if !(rating > 0.0) {
        return None;
    }

    let out_of_ten = (f64::from(rating.min(5.0)) * 2.0).round() as u8;
    let full = out_of_ten / 2;
    let half = out_of_ten % 2;

    Some(StarBreakdown {
        full,
        half,
        empty: 5 - full - half,
    })
}

/// "$" repeated `price_level` times; `None` for free or unknown
pub fn price_indicator(price_level: u8) -> Option<String> {
    (price_level > 0).then(|| "$".repeat(usize::from(price_level)))
}

/// Hostname of a website URL
pub fn website_domain(website: &str) -> Option<String> {
    Url::parse(website)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Build the details panel model
/// DOCUMENTATION: Missing fields skip their derived summaries
pub fn build_details_view(details: PlaceDetails) -> PlaceDetailsView {
    let opening_hours_summary = details
        .opening_hours
        .as_ref()
        .map(|hours| summarize_opening_hours(&hours.weekday_text));

    PlaceDetailsView {
        website_domain: details.website.as_deref().and_then(website_domain),
        stars: details.rating.and_then(star_breakdown),
        price_indicator: details.price_level.and_then(price_indicator),
        open_now: details.opening_hours.as_ref().and_then(|h| h.open_now),
        opening_hours_summary,
        formatted_phone_number: details.formatted_phone_number,
        website: details.website,
        url: details.url,
        utc_offset_minutes: details.utc_offset_minutes,
        rating: details.rating,
        user_ratings_total: details.user_ratings_total,
        price_level: details.price_level,
    }
}
