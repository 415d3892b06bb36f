//! Print the service's OpenAPI document as pretty JSON.

use anyhow::Context;
use api_scaffold_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .context("serializing the OpenAPI document")?;
    println!("{doc}");
    Ok(())
}
