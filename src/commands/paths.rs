//! Print the path of every post

use anyhow::Result;

use crate::Blog;

pub async fn run(blog: &Blog) -> Result<()> {
    let slugs = blog.slugs().await?;
    tracing::info!("Found {} posts", slugs.len());
    for slug in slugs {
        println!("/post/{}", slug);
    }
    Ok(())
}
