#![allow(dead_code)]

pub mod fixtures {
    use std::path::PathBuf;

    /// Absolute path of a file under `tests/fixtures`
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    pub fn read_fixture(name: &str) -> Vec<u8> {
        std::fs::read(fixture_path(name)).unwrap()
    }
}

pub mod markdown {
    use oasdoc::{convert, ConvertOptions, ConvertResult};

    /// Convert a YAML document with the given title and otherwise default options
    pub fn convert_yaml(yaml: &str, title: &str) -> ConvertResult {
        convert(yaml.as_bytes(), &ConvertOptions::new(title)).unwrap()
    }

    /// Number of non-overlapping occurrences of `needle` in `haystack`
    pub fn occurrences(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    /// Wrap component schemas and a single `POST /things` body into a document
    pub fn body_document(version: &str, body_schema: &str, schemas: &str) -> String {
        format!(
            "openapi: {version}
info:
  title: Things
  version: 1.0.0
paths:
  /things:
    post:
      summary: Create thing
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/{body_schema}'
      responses:
        '204':
          description: Created
components:
  schemas:
{schemas}"
        )
    }
}
