//! Example listing every project visible to an auth token.
//!
//! This example shows how to:
//! - Authenticate with a bearer token
//! - Walk a paginated listing with the `Link` header cursor
//! - Back off when the rate limit quota is exhausted
//!
//! Run with: `SENTRY_AUTH_TOKEN=... cargo run --example list_projects`

use sentry_api::{Client, Error, ListCursorParams};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("sentry_api=debug")
        .init();

    let token = std::env::var("SENTRY_AUTH_TOKEN")?;
    let client = Client::builder()
        .default_header("Authorization", format!("Bearer {token}"))?
        .timeout(Duration::from_secs(30))
        .build()?;

    let mut params = ListCursorParams::default();
    loop {
        let page = match client.projects().list(&params).await {
            Ok(page) => page,
            Err(Error::RateLimited(e)) => {
                let wait = e
                    .rate
                    .delay(Duration::from_secs(60))
                    .unwrap_or(Duration::from_secs(1));
                println!("Rate limited, waiting {:?}", wait);
                tokio::time::sleep(wait).await;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        for project in page.iter() {
            let organization = project
                .organization
                .as_ref()
                .and_then(|o| o.slug.as_deref())
                .unwrap_or("-");
            println!("{}/{}", organization, project.slug);
        }
        println!("({} requests left in this window)", page.rate.remaining);

        if !page.has_next_page() {
            break;
        }
        params.cursor = Some(page.cursor.clone());
    }

    Ok(())
}
