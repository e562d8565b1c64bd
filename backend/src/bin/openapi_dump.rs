//! Print the OpenAPI document as JSON.

use std::io;

use slo_backend::doc::ApiDoc;
use utoipa::OpenApi;

#[expect(clippy::print_stdout, reason = "the document is the program's output")]
fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|e| io::Error::other(format!("serialise OpenAPI document: {e}")))?;
    println!("{json}");
    Ok(())
}
