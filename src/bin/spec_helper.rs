#![allow(clippy::expect_used)]

use oasdoc::load_document_from_path;
use oasdoc::usage::identify_shared_schemas;
use std::path::PathBuf;

fn main() {
    let path = PathBuf::from(std::env::args().nth(1).expect("spec path"));
    match load_document_from_path(&path) {
        Ok(document) => {
            println!("openapi: {}", document.openapi);
            println!("endpoints: {}", document.endpoints.len());
            println!("schemas: {}", document.schemas.len());
            for (name, usage) in identify_shared_schemas(&document.endpoints) {
                println!("shared: {name} ({})", usage.endpoints.len());
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
