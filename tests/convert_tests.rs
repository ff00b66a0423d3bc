#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::read_fixture;
use common::markdown::{body_document, convert_yaml, occurrences};
use oasdoc::{convert, ConvertError, ConvertOptions};

const USERS_SHARED_MARKDOWN: &str = r##"# User API

## Table of Contents

HTTP Request | Description
-------------|------------
POST [/users](#postusers) | Create user
GET [/users/{id}](#getusersid) | Get user

## POST /users

Create user

### Request

```json
{
   "id": "example",
   "name": "example"
}
```

#### Field Definitions

See [User](#user)

### Responses

#### 201 Response

Created

```json
{
   "id": "example",
   "name": "example"
}
```

#### Field Definitions

See [User](#user)

## GET /users/{id}

Get user

#### Path Parameters

- `id` *(string, required)* User id

### Responses

#### 200 Response

OK

```json
{
   "id": "example",
   "name": "example"
}
```

#### Field Definitions

See [User](#user)

## Shared Schema Definitions

### User

Used in: GET /users/{id}, POST /users

- `id` *(string, required)* Identifier
- `name` *(string)* Display name

"##;

#[test]
fn test_minimal_document() {
    let yaml = "openapi: 3.0.0
info:
  title: Test API
  description: Test Description
  version: 1.0.0
paths: {}";

    let result = convert(
        yaml.as_bytes(),
        &ConvertOptions::new("Test API").with_description("Test Description"),
    )
    .unwrap();
    assert_eq!(result.markdown, "# Test API\n\nTest Description\n\n");
    assert_eq!(result.endpoint_count, 0);
    assert_eq!(result.tag_count, 0);

    let result = convert_yaml(yaml, "Test API");
    assert_eq!(result.markdown, "# Test API\n\n");
}

#[test]
fn test_input_validation_errors() {
    let valid = b"openapi: 3.0.0\ninfo: {title: T, version: '1'}\npaths: {}";

    assert_eq!(
        convert(b"", &ConvertOptions::default()).unwrap_err(),
        ConvertError::EmptyInput
    );
    assert_eq!(
        convert(valid, &ConvertOptions::default()).unwrap_err(),
        ConvertError::EmptyTitle
    );

    let opts = ConvertOptions::new("T");
    assert!(matches!(
        convert(b"openapi: [3.0.0", &opts).unwrap_err(),
        ConvertError::Parse(_)
    ));
    assert_eq!(
        convert(b"info: {title: T, version: '1'}\npaths: {}", &opts).unwrap_err(),
        ConvertError::MissingVersion
    );

    let err = convert(b"swagger: '2.0'\ninfo: {title: T, version: '1'}\npaths: {}", &opts).unwrap_err();
    assert_eq!(err.to_string(), "only openapi 3.x is supported, got version: 2.0");
}

#[test]
fn test_unresolved_schema_reference_fails_model_build() {
    let yaml = body_document(
        "3.0.0",
        "Thing",
        "    Thing:
      type: object
      properties:
        part:
          $ref: '#/components/schemas/Missing'
",
    );
    let err = convert(yaml.as_bytes(), &ConvertOptions::new("Things")).unwrap_err();
    assert!(matches!(err, ConvertError::ModelBuild(_)), "unexpected error: {err}");
}

#[test]
fn test_shared_user_schema_end_to_end() {
    let opts = ConvertOptions::new("User API").with_shared_schemas(true);
    let result = convert(&read_fixture("users.yaml"), &opts).unwrap();

    assert_eq!(result.markdown, USERS_SHARED_MARKDOWN);
    assert_eq!(result.endpoint_count, 2);
    assert_eq!(result.tag_count, 1);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_shared_rendering_disabled_inlines_definitions() {
    let opts = ConvertOptions::new("User API").with_debug(true);
    let result = convert(&read_fixture("users.yaml"), &opts).unwrap();
    let md = &result.markdown;

    assert!(!md.contains("Shared Schema Definitions"));
    assert!(!md.contains("See [User]"));
    assert_eq!(
        occurrences(
            md,
            "#### Field Definitions\n\n- `id` *(string, required)* Identifier\n- `name` *(string)* Display name\n\n"
        ),
        3
    );
    // Usage analysis still runs
    assert_eq!(result.debug.unwrap().shared_schema_count, 1);
}

#[test]
fn test_schema_used_by_one_endpoint_is_not_shared() {
    let yaml = body_document(
        "3.0.0",
        "Thing",
        "    Thing:
      type: object
      properties:
        name:
          type: string
          description: Thing name
",
    );
    let result = convert(
        yaml.as_bytes(),
        &ConvertOptions::new("Things").with_shared_schemas(true),
    )
    .unwrap();

    assert!(result
        .markdown
        .contains("#### Field Definitions\n\n- `name` *(string)* Thing name\n\n"));
    assert!(!result.markdown.contains("Shared Schema Definitions"));
}

#[test]
fn test_self_referencing_tree_expands_once() {
    let yaml = body_document(
        "3.0.0",
        "Tree",
        "    Tree:
      type: object
      properties:
        name:
          type: string
          description: Node name
        children:
          type: array
          items:
            $ref: '#/components/schemas/Tree'
",
    );
    let result = convert_yaml(&yaml, "Trees");

    assert!(result.markdown.contains(
        "#### Field Definitions\n\n\
         - `name` *(string)* Node name\n\
         - `children` *(array of Tree)*\n\n\
         **Tree**\n\
         - `name` *(string)*: Node name\n\
         - `children` *(array of Tree)*\n\n"
    ));
    assert_eq!(occurrences(&result.markdown, "**Tree**"), 1);
}

#[test]
fn test_reference_chain_stops_at_depth_ceiling() {
    let mut schemas = String::new();
    for level in 0..=12 {
        schemas.push_str(&format!(
            "    S{level}:
      type: object
      properties:
        value:
          type: string
          description: Level {level}
"
        ));
        if level < 12 {
            schemas.push_str(&format!(
                "        next:
          $ref: '#/components/schemas/S{}'
",
                level + 1
            ));
        }
    }
    let yaml = body_document("3.0.0", "S0", &schemas);
    let result = convert_yaml(&yaml, "Chain");
    let md = &result.markdown;

    for level in 1..=9 {
        assert!(md.contains(&format!("**S{level}**\n")), "missing S{level}");
    }
    for level in 10..=12 {
        assert!(!md.contains(&format!("**S{level}**\n")), "unexpected S{level}");
    }
    // The last expanded section still names the next link
    assert!(md.contains("**S9**\n- `value` *(string)*: Level 9\n- `next` *(S10)*\n\n"));
}

#[test]
fn test_configured_depth_ceiling() {
    let yaml = body_document(
        "3.0.0",
        "A",
        "    A:
      type: object
      properties:
        b:
          $ref: '#/components/schemas/B'
    B:
      type: object
      properties:
        c:
          $ref: '#/components/schemas/C'
    C:
      type: object
      properties:
        leaf:
          type: string
          description: Leaf
",
    );
    let opts = ConvertOptions {
        max_depth: 2,
        ..ConvertOptions::new("Depth")
    };
    let result = convert(yaml.as_bytes(), &opts).unwrap();
    assert!(result.markdown.contains("**B**\n- `c` *(C)*\n\n"));
    assert!(!result.markdown.contains("**C**"));
}

#[test]
fn test_array_labels_and_nested_sections() {
    let result = convert(&read_fixture("petstore.yaml"), &ConvertOptions::new("Pet Store")).unwrap();
    let md = &result.markdown;

    assert!(md.contains(
        "- `items` *(array of Pet)* Pets on this page\n\
         - `labels` *(string array)* Page labels\n\n\
         **Pet**\n\
         - `id` *(string, required)*: Pet id\n\
         - `name` *(string)*: Pet name\n\
         - `status` *(string)*: Adoption state. Enums: `available`, `sold`\n\n"
    ));
    assert!(!md.contains("array of objects"));
    assert!(md.contains(
        "- `id` *(string, required)* Pet id\n\
         - `name` *(string)* Pet name\n\
         - `status` *(string)* Adoption state Enums: `available`, `sold`\n\n"
    ));
}

#[test]
fn test_table_of_contents_and_tag_groups() {
    let result = convert(&read_fixture("petstore.yaml"), &ConvertOptions::new("Pet Store")).unwrap();
    let md = &result.markdown;

    assert_eq!(result.endpoint_count, 3);
    assert_eq!(result.tag_count, 3);
    assert!(md.contains(
        "## Table of Contents\n\n\
         HTTP Request | Description\n\
         -------------|------------\n\
         GET [/pets](#getpets) | List pets\n\
         GET [/pets/{petId}](#getpetspetid) | Get a pet\n\
         GET [/health](#gethealth) | Health check\n\n"
    ));

    let pets = md.find("## pets\n\n### GET /pets\n\n").unwrap();
    let store = md.find("## store\n\n### GET /pets/{petId}\n\n").unwrap();
    let default = md.find("## Default APIs\n\n### GET /health\n\n").unwrap();
    assert!(pets < store && store < default);

    // Tagged twice, rendered under both tags
    assert_eq!(occurrences(md, "### GET /pets/{petId}\n\nReturns a single pet\n\n"), 2);
}

#[test]
fn test_parameters_rendering() {
    let result = convert(&read_fixture("petstore.yaml"), &ConvertOptions::new("Pet Store")).unwrap();
    let md = &result.markdown;

    assert!(md.contains(
        "#### Query Parameters\n\n\
         - `limit` *(integer)* Page size\n\n\
         - `status` *(string)* Filter by status Enums: `available`, `sold`\n\n"
    ));
    assert!(md.contains(
        "#### Headers\n\n\
         Name | Description | Required | Type\n\
         -----|-------------|----------|-----\n\
         X-Request-Id | Correlation id | true | string\n\n"
    ));
    assert!(md.contains("#### Path Parameters\n\n- `petId` *(string, required)* Pet identifier\n\n"));
    assert!(!md.contains("session"));
}

#[test]
fn test_responses_sorted_with_descriptions() {
    let result = convert(&read_fixture("petstore.yaml"), &ConvertOptions::new("Pet Store")).unwrap();
    let md = &result.markdown;

    let ok = md.find("#### 200 Response\n\nThe pet\n\n").unwrap();
    let missing = md.find("#### 404 Response\n\nPet not found\n\n").unwrap();
    assert!(ok < missing);
    assert!(md.contains("\"id\": \"00000000-0000-0000-0000-000000000000\""));
    assert!(md.contains("#### 200 Response\n\nHealthy\n\n"));
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_debug_counts() {
    let opts = ConvertOptions::new("Pet Store").with_debug(true);
    let result = convert(&read_fixture("petstore.yaml"), &opts).unwrap();
    let debug = result.debug.unwrap();

    assert_eq!(debug.parsed_paths, 3);
    assert_eq!(debug.extracted_ops, 3);
    assert_eq!(debug.untagged_ops, 1);
    assert_eq!(debug.tags_found, vec!["Default APIs", "pets", "store"]);
    assert_eq!(debug.parameter_counts["path"], 1);
    assert_eq!(debug.parameter_counts["query"], 2);
    assert_eq!(debug.parameter_counts["header"], 1);
    assert_eq!(debug.parameter_counts["cookie"], 1);
    assert_eq!(debug.response_counts["200"], 3);
    assert_eq!(debug.response_counts["404"], 1);
    assert_eq!(debug.request_body_count, 0);
    assert_eq!(debug.shared_schema_count, 0);

    let quiet = convert(&read_fixture("petstore.yaml"), &ConvertOptions::new("Pet Store")).unwrap();
    assert!(quiet.debug.is_none());
}

const MESSAGE_SCHEMAS: &str = "components:
  schemas:
    Message:
      type: object
      properties:
        text:
          type: string
          description: Body text
";

fn message_response(media_extra: &str) -> String {
    format!(
        "openapi: 3.1.0
info:
  title: Test API
  version: 1.0.0
paths:
  /test:
    get:
      summary: Read message
      responses:
        '200':
          description: Success
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Message'
{media_extra}{MESSAGE_SCHEMAS}"
    )
}

#[test]
fn test_response_example_priority() {
    let cases = [
        (
            "media example",
            "              example:
                text: from media
              examples:
                other:
                  value:
                    text: from named
",
            "\"text\": \"from media\"",
            Some("from named"),
        ),
        (
            "named examples",
            "              examples:
                first:
                  value:
                    text: from named
",
            "\"text\": \"from named\"",
            None,
        ),
        ("generated", "", "\"text\": \"example\"", None),
    ];

    for (name, extra, want, absent) in cases {
        let result = convert_yaml(&message_response(extra), "Test API");
        assert!(result.markdown.contains(want), "{name}: {}", result.markdown);
        if let Some(absent) = absent {
            assert!(!result.markdown.contains(absent), "{name}");
        }
    }
}

#[test]
fn test_schema_singular_example_beats_example_list() {
    let yaml = body_document(
        "3.1.0",
        "Message",
        "    Message:
      type: object
      example:
        text: singular
      examples:
        - text: listed
      properties:
        text:
          type: string
          description: Body text
",
    );
    let result = convert_yaml(&yaml, "Messages");
    assert!(result.markdown.contains("\"text\": \"singular\""));
    assert!(!result.markdown.contains("listed"));
}

#[test]
fn test_inline_body_schema_is_rejected() {
    let response = "openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /test:
    get:
      responses:
        '200':
          description: Success
          content:
            application/json:
              schema:
                type: object
                properties:
                  text:
                    type: string
";
    let err = convert(response.as_bytes(), &ConvertOptions::new("Test API")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "inline schema not supported in GET /test 200 response, use $ref"
    );

    let request = "openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /test:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
      responses:
        '204':
          description: Done
";
    let err = convert(request.as_bytes(), &ConvertOptions::new("Test API")).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSchema { .. }));
    assert!(err.to_string().contains("POST /test request body"));
}

#[test]
fn test_non_json_media_types_are_ignored() {
    let yaml = "openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /page:
    get:
      summary: Render page
      responses:
        '200':
          description: Success
          content:
            text/html:
              schema:
                type: string
";
    let result = convert_yaml(yaml, "Test API");
    assert!(result.markdown.contains("#### 200 Response\n\nSuccess\n\n"));
    assert!(!result.markdown.contains("```"));
}

#[test]
fn test_response_schema_shared_across_status_codes() {
    let yaml = "openapi: 3.0.0
info:
  title: Items
  version: 1.0.0
paths:
  /items:
    put:
      summary: Upsert item
      responses:
        '200':
          description: Updated
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
        '201':
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Item'
        '400':
          description: Bad input
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Error'
components:
  schemas:
    Item:
      type: object
      properties:
        sku:
          type: string
          description: SKU
    Error:
      type: object
      properties:
        message:
          type: string
          description: What went wrong
";
    let result = convert_yaml(yaml, "Items");
    let md = &result.markdown;

    assert_eq!(occurrences(md, "Field Definitions"), 1);
    assert!(md.contains("#### Field Definitions (applies to 200, 201 responses)\n\n- `sku` *(string)* SKU\n\n"));
    // Error bodies get an example but no field definitions
    assert!(md.contains("\"message\": \"example\""));
    assert!(!md.contains("- `message`"));
}

const NODES: &str = "openapi: 3.0.0
info:
  title: Nodes
  version: 1.0.0
paths:
  /nodes:
    get:
      summary: List nodes
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Node'
    post:
      summary: Create node
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Node'
      responses:
        '201':
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Node'
components:
  schemas:
    Node:
      type: object
      properties:
        value:
          type: string
          description: Value
        next:
          $ref: '#/components/schemas/Node'
";

#[test]
fn test_shared_check_precedes_recursion() {
    let opts = ConvertOptions::new("Nodes").with_shared_schemas(true);
    let result = convert(NODES.as_bytes(), &opts).unwrap();
    let md = &result.markdown;

    assert_eq!(occurrences(md, "See [Node](#node)\n\n"), 3);
    assert!(md.ends_with(
        "## Shared Schema Definitions\n\n\
         ### Node\n\n\
         Used in: GET /nodes, POST /nodes\n\n\
         - `value` *(string)* Value\n\
         - `next` *(Node)*\n\n\
         **Node**\n\
         - `value` *(string)*: Value\n\
         - `next` *(Node)*\n\n"
    ));
    assert_eq!(occurrences(md, "**Node**"), 1);
}

#[test]
fn test_recursive_schema_inlined_when_not_shared() {
    let result = convert_yaml(NODES, "Nodes");
    assert_eq!(occurrences(&result.markdown, "**Node**\n"), 3);
    assert!(!result.markdown.contains("See [Node]"));
}

#[test]
fn test_discriminated_union_response() {
    let yaml = "openapi: 3.0.0
info:
  title: Pets
  version: 1.0.0
paths:
  /pet:
    get:
      summary: Random pet
      responses:
        '200':
          description: A pet
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      oneOf:
        - $ref: '#/components/schemas/Cat'
        - $ref: '#/components/schemas/Dog'
      discriminator:
        propertyName: petType
    Cat:
      type: object
      properties:
        meows:
          type: boolean
          description: Whether it meows
    Dog:
      type: object
      properties:
        barks:
          type: boolean
          description: Whether it barks
";
    let result = convert_yaml(yaml, "Pets");
    let md = &result.markdown;

    assert!(md.contains(
        "#### Field Definitions\n\n\
         Response body is one of the following variants, selected by the `petType` field:\n\n\
         **Cat**\n\
         - `meows` *(boolean)* Whether it meows\n\n\
         **Dog**\n\
         - `barks` *(boolean)* Whether it barks\n\n"
    ));
    // The example comes from the first variant
    assert!(md.contains("\"meows\": true"));
}

#[test]
fn test_missing_descriptions_become_warnings() {
    let yaml = "openapi: 3.0.0
info:
  title: Bare
  version: 1.0.0
paths:
  /bare:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Bare'
      responses:
        '204':
          description: Done
components:
  schemas:
    Bare:
      type: object
      properties:
        count:
          type: integer
";
    let result = convert_yaml(yaml, "Bare");
    assert_eq!(
        result.warnings,
        vec![
            "no description or summary for POST /bare".to_string(),
            "field 'count' of Bare is missing a description".to_string(),
        ]
    );
    assert!(result.markdown.contains("- `count` *(integer)*\n\n"));
}

#[test]
fn test_json_document_input() {
    let json = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Json", "version": "1.0.0"},
  "paths": {
    "/ping": {"get": {"summary": "Ping", "responses": {"200": {"description": "Pong"}}}}
  }
}"#;
    let result = convert_yaml(json, "Json API");
    assert!(result.markdown.starts_with("# Json API\n\n## Table of Contents\n\n"));
    assert!(result.markdown.contains("## GET /ping\n\nPing\n\n### Responses\n\n#### 200 Response\n\nPong\n\n"));
}

#[test]
fn test_openapi_30_only_keywords_convert() {
    let yaml = body_document(
        "3.0.3",
        "Counter",
        "    Counter:
      type: object
      required:
        - n
      properties:
        n:
          type: integer
          minimum: 0
          exclusiveMinimum: true
          description: Positive count
        label:
          type: string
          nullable: true
          description: Optional label
",
    );
    let result = convert_yaml(&yaml, "Counters");
    assert!(result.markdown.contains(
        "#### Field Definitions\n\n\
         - `n` *(integer, required)* Positive count\n\
         - `label` *(string)* Optional label\n\n"
    ));
}

#[test]
fn test_document_without_info_version_converts() {
    for version in ["3.0.0", "3.1.0"] {
        let yaml = format!(
            "openapi: {version}
info:
  title: T
paths:
  /ping:
    get:
      summary: Ping
      responses:
        '200':
          description: Pong
"
        );
        let result = convert_yaml(&yaml, "T");
        assert_eq!(result.endpoint_count, 1, "openapi {version}");
        assert!(result.markdown.contains("## GET /ping\n\nPing\n\n"));
    }
}

#[test]
fn test_huge_example_depth_on_recursive_schema() {
    let opts = ConvertOptions {
        example_depth: usize::MAX,
        ..ConvertOptions::new("Nodes")
    };
    let result = convert(NODES.as_bytes(), &opts).unwrap();
    assert!(result.markdown.contains("\"value\": \"example\""));
}
