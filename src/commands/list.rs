//! List posts from the home listing

use anyhow::Result;

use crate::helpers::Helpers;
use crate::pagination::Page;
use crate::Blog;

/// Print the first `pages` listing pages
pub async fn run(blog: &Blog, pages: usize, json: bool) -> Result<()> {
    let mut page = blog.home().await?;
    for _ in 1..pages.max(1) {
        if !page.has_more() {
            break;
        }
        page = blog.load_more(&page).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let helpers = Helpers::new(blog.config.clone());
    print!("{}", render(&blog.config.title, &helpers, &page));
    Ok(())
}

/// Plain-text rendering of a listing page under the site title
pub fn render(title: &str, helpers: &Helpers, page: &Page) -> String {
    let mut out = format!("{} - Posts ({}):\n", title, page.items.len());
    for post in &page.items {
        out.push_str(&format!(
            "  {} - {} [{}] by {}\n",
            helpers.publication_date(post.first_published_at.as_ref()),
            post.title,
            post.slug,
            post.author
        ));
        if !post.subtitle.is_empty() {
            out.push_str(&format!("      {}\n", post.subtitle));
        }
    }

    if page.has_more() {
        out.push_str("More posts available, pass --pages to load them\n");
    }
    out
}
