//! Show a single post with its metadata and navigation

use anyhow::Result;

use crate::content::BlockType;
use crate::helpers::Helpers;
use crate::{Blog, PostView};

pub async fn run(blog: &Blog, slug: &str, json: bool) -> Result<()> {
    let view = blog.post(slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!("{}", render(&Helpers::new(blog.config.clone()), &view));
    Ok(())
}

/// Plain-text rendering of a post view
pub fn render(helpers: &Helpers, view: &PostView) -> String {
    let post = &view.post;
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title));
    if !post.subtitle.is_empty() {
        out.push_str(&format!("{}\n", post.subtitle));
    }
    out.push_str(&format!(
        "{} | {} | {}\n",
        helpers.publication_date(post.first_published_at.as_ref()),
        post.author,
        helpers.read_time(view.read_minutes)
    ));
    if view.is_edited {
        if let Some(edited) = &post.last_published_at {
            out.push_str(&format!("* edited on {}\n", helpers.date(edited)));
        }
    }
    if let Some(banner) = &post.banner {
        out.push_str(&format!("[banner] {}\n", banner));
    }

    for section in &post.content {
        out.push_str(&format!("\n## {}\n", section.heading));
        for block in &section.body {
            match block.block_type {
                BlockType::ListItem | BlockType::OrderedListItem => {
                    out.push_str(&format!("  - {}\n", block.text))
                }
                _ => out.push_str(&format!("{}\n", block.text)),
            }
        }
    }

    out.push('\n');
    if let Some(previous) = &view.previous {
        out.push_str(&format!("<- {} (/post/{})\n", previous.title, previous.slug));
    }
    if let Some(next) = &view.next {
        out.push_str(&format!("-> {} (/post/{})\n", next.title, next.slug));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{Post, PostSummary, Section, TextBlock};
    use chrono::{TimeZone, Utc};

    fn view(is_edited: bool) -> PostView {
        let first = Utc.with_ymd_and_hms(2021, 3, 15, 10, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2021, 3, 25, 10, 0, 0).unwrap();
        PostView {
            post: Post {
                id: "YF1".to_string(),
                slug: "hooks".to_string(),
                first_published_at: Some(first),
                last_published_at: Some(last),
                title: "Hooks".to_string(),
                subtitle: String::new(),
                author: "Ana".to_string(),
                banner: None,
                content: vec![Section {
                    heading: "Intro".to_string(),
                    body: vec![TextBlock {
                        text: "item".to_string(),
                        block_type: BlockType::ListItem,
                        spans: Vec::new(),
                    }],
                }],
            },
            is_edited,
            read_minutes: 1,
            previous: Some(PostSummary {
                id: "YF0".to_string(),
                slug: "older".to_string(),
                title: "Older".to_string(),
                subtitle: String::new(),
                author: "Ana".to_string(),
                first_published_at: None,
            }),
            next: None,
        }
    }

    #[test]
    fn test_render_post() {
        let helpers = Helpers::new(SiteConfig::default());
        let out = render(&helpers, &view(true));
        assert!(out.starts_with("Hooks\n15 mar 2021 | Ana | 1 min\n"));
        assert!(out.contains("* edited on 25 mar 2021"));
        assert!(out.contains("## Intro\n  - item\n"));
        assert!(out.contains("<- Older (/post/older)"));
        assert!(!out.contains("->"));
    }

    #[test]
    fn test_render_unedited_post() {
        let helpers = Helpers::new(SiteConfig::default());
        assert!(!render(&helpers, &view(false)).contains("edited on"));
    }
}
