//! CLI output formatting.
//!
//! Output is information-first: every image line leads with its position
//! and alt text, with the source url and crop hints as indented context.
//!
//! ## Today
//!
//! ```text
//! 2025-01-02: bucket 2 of 3
//! 001 Main Hall [Campus] landscape
//!     Source: 010-Campus/001-Main-Hall.jpg
//!     Focus: center / center
//! ```
//!
//! ## Calendar
//!
//! ```text
//! 2025-01-01  bucket 1/3  ids 1, 2, 3, ...
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::catalog::Catalog;
use crate::imaging::Orientation;
use crate::schedule::DailyImageSet;
use crate::viewer::{LoadState, Transform, ViewerEvent};
use chrono::NaiveDate;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn orientation_label(orientation: Option<Orientation>) -> &'static str {
    match orientation {
        Some(Orientation::Portrait) => "portrait",
        Some(Orientation::Landscape) => "landscape",
        Some(Orientation::Square) => "square",
        None => "unknown size",
    }
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// today
// ============================================================================

pub fn format_daily_set(date: NaiveDate, set: &DailyImageSet) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: bucket {} of {}",
        date,
        set.day_index + 1,
        set.total_days
    )];
    for (i, slide) in set.images.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}] {}",
            format_index(i + 1),
            slide.image.alt_text,
            slide.image.category,
            orientation_label(slide.layout.orientation)
        ));
        lines.push(format!("    Source: {}", slide.image.url));
        lines.push(format!(
            "    Focus: {} / {}",
            slide.layout.mobile_position, slide.layout.desktop_position
        ));
    }
    lines
}

pub fn print_daily_set(date: NaiveDate, set: &DailyImageSet) {
    for line in format_daily_set(date, set) {
        println!("{}", line);
    }
}

// ============================================================================
// calendar
// ============================================================================

pub fn format_calendar(days: &[(NaiveDate, DailyImageSet)]) -> Vec<String> {
    days.iter()
        .map(|(date, set)| {
            format!(
                "{}  bucket {}/{}  ids {}",
                date,
                set.day_index + 1,
                set.total_days,
                join_ids(&set.ids())
            )
        })
        .collect()
}

pub fn print_calendar(days: &[(NaiveDate, DailyImageSet)]) {
    for line in format_calendar(days) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Catalog summary plus rotation health.
pub fn format_check(
    catalog: &Catalog,
    images_per_day: usize,
    total_days: usize,
    unshown: &[u32],
) -> Vec<String> {
    let mut lines = vec![
        "Catalog".to_string(),
        format!("    {} images", catalog.len()),
    ];

    let mut categories: Vec<(&str, usize)> = Vec::new();
    for image in catalog.images() {
        match categories.iter_mut().find(|(c, _)| *c == image.category) {
            Some((_, count)) => *count += 1,
            None => categories.push((&image.category, 1)),
        }
    }
    for (i, (category, count)) in categories.iter().enumerate() {
        lines.push(format!("    {} {} ({} photos)", format_index(i + 1), category, count));
    }
    let unsized_count = catalog
        .images()
        .iter()
        .filter(|i| i.dimensions.is_none())
        .count();
    if unsized_count > 0 {
        lines.push(format!(
            "    {} images without dimensions (centered crop)",
            unsized_count
        ));
    }

    lines.push("Rotation".to_string());
    lines.push(format!(
        "    {} images per day, {}-day cycle",
        images_per_day, total_days
    ));
    if unshown.is_empty() {
        lines.push("    every image is shown once per cycle".to_string());
    } else {
        lines.push(format!("    never shown: {}", join_ids(unshown)));
    }
    lines
}

pub fn print_check(catalog: &Catalog, images_per_day: usize, total_days: usize, unshown: &[u32]) {
    for line in format_check(catalog, images_per_day, total_days, unshown) {
        println!("{}", line);
    }
}

// ============================================================================
// replay
// ============================================================================

fn event_label(event: &ViewerEvent) -> String {
    match event {
        ViewerEvent::Open { image } => format!("open {}", image.url),
        ViewerEvent::Close => "close".to_string(),
        ViewerEvent::BackdropClick => "backdrop click".to_string(),
        ViewerEvent::Key { key } => format!("key {}", key),
        ViewerEvent::Wheel { delta_y } => format!("wheel {}", delta_y),
        ViewerEvent::ZoomIn => "zoom in".to_string(),
        ViewerEvent::ZoomOut => "zoom out".to_string(),
        ViewerEvent::Reset => "reset".to_string(),
        ViewerEvent::MouseDown { x, y } => format!("mouse down ({}, {})", x, y),
        ViewerEvent::MouseMove { x, y } => format!("mouse move ({}, {})", x, y),
        ViewerEvent::MouseUp => "mouse up".to_string(),
        ViewerEvent::MouseLeave => "mouse leave".to_string(),
        ViewerEvent::TouchStart { touches } => format!("touch start x{}", touches.len()),
        ViewerEvent::TouchMove { touches } => format!("touch move x{}", touches.len()),
        ViewerEvent::TouchEnd => "touch end".to_string(),
        ViewerEvent::ImageLoaded => "image loaded".to_string(),
        ViewerEvent::ImageFailed => "image failed".to_string(),
    }
}

/// One line per replayed event: what happened, then the resulting render state.
pub fn format_replay_step(
    step: usize,
    event: &ViewerEvent,
    transform: Option<Transform>,
    load: Option<LoadState>,
) -> String {
    let state = match (transform, load) {
        (Some(t), Some(load)) => format!("{} [{:?}]", t.to_css(), load),
        _ => "closed".to_string(),
    };
    format!("{} {} -> {}", format_index(step), event_label(event), state)
}
