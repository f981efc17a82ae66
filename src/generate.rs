//! Static hero preview page.
//!
//! Renders the day's selection as a standalone `index.html` so the rotation
//! and its crop hints can be checked in a browser before publishing.
//!
//! ## Output
//!
//! ```text
//! preview/
//! └── index.html     # one <figure> per selected image, in slide order
//! ```
//!
//! Each figure carries its focal hints as CSS custom properties
//! (`--focus-mobile`, `--focus-desktop`); the embedded stylesheet switches
//! between them at the desktop breakpoint. The slideshow interval is exposed
//! as `data-interval-ms` on the hero for whatever script drives it.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::config::SiteConfig;
use crate::schedule::{DailyImage, DailyImageSet};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = r#"
body { margin: 0; background: #0a0a0a; color: #eee; font-family: system-ui, sans-serif; }
header { padding: 1rem 2rem; }
.hero { display: grid; gap: 1rem; padding: 1rem 2rem; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); }
.hero figure { margin: 0; }
.hero img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; object-position: var(--focus-mobile); }
.hero figcaption { font-size: 0.85rem; color: #999; padding-top: 0.25rem; }
@media (min-width: 768px) {
  .hero img { object-position: var(--focus-desktop); }
}
"#;

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn render_slide(position: usize, slide: &DailyImage) -> Markup {
    let focus = format!(
        "--focus-mobile: {}; --focus-desktop: {};",
        slide.layout.mobile_position, slide.layout.desktop_position
    );
    html! {
        figure class=(slide.layout.css_class()) data-slide=(position) data-image-id=(slide.image.id) {
            img src=(slide.image.url) alt=(slide.image.alt_text) style=(focus) loading=(if position == 0 { "eager" } else { "lazy" });
            figcaption {
                (slide.image.category) " · " (slide.image.alt_text)
            }
        }
    }
}

/// Render the hero preview for `date`.
pub fn render_hero_page(set: &DailyImageSet, config: &SiteConfig, date: NaiveDate) -> Markup {
    let title = format!("Hero preview for {date}");
    let content = html! {
        header {
            h1 { (title) }
            p { "Bucket " (set.day_index + 1) " of " (set.total_days) ", " (set.images.len()) " images" }
        }
        section class="hero" data-interval-ms=(config.slideshow.interval_ms) {
            @for (position, slide) in set.images.iter().enumerate() {
                (render_slide(position, slide))
            }
        }
    };
    base_document(&title, content)
}

/// Write the preview page to `output_dir/index.html` and return its path.
pub fn write_preview(
    set: &DailyImageSet,
    config: &SiteConfig,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("index.html");
    fs::write(&path, render_hero_page(set, config, date).into_string())?;
    Ok(path)
}
