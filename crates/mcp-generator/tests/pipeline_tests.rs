//! Pipeline tests with a scripted LLM and mocked documentation hosts.

use async_trait::async_trait;
use mockito::{Mock, Server, ServerGuard};
use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
use shadcn_mcp_core::{DocsSettings, Error, Necessity, Result};
use shadcn_mcp_docs::{CatalogFetcher, DocReader};
use shadcn_mcp_generator::prompts::{CREATE_UI, FILTER_COMPONENTS, REFINED_UI};
use shadcn_mcp_generator::{GenerationSettings, UiGenerator};
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Replies from a fixed script and records every request.
#[derive(Debug, Default)]
struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

const LOGIN_SELECTION: &str = r#"I picked these:
```json
{
  "component": [
    {"name": "Input", "necessity": "critical", "justification": "email and password fields"},
    {"name": "Button", "necessity": "critical", "justification": "submit action"},
    {"name": "Form", "necessity": "important", "justification": "validation and layout"}
  ],
  "charts": []
}
```"#;

const LOGIN_UI: &str = r#"<script setup lang="ts">
import { Button } from '@/components/ui/button'
import { Input } from '@/components/ui/input'
import { Form } from '@/components/ui/form'
</script>
<template>
  <Form><Input type="email" /><Input type="password" /><Button>Sign in</Button></Form>
</template>"#;

fn usage_doc(component: &str) -> String {
    format!("# {component}\n\n## Usage\n\n```vue\n<{component} />\n```\n\n## Examples\n\n```vue\n<{component} extra />\n```\n")
}

/// Mock docs host; the returned mocks must stay alive for the test.
async fn docs_server() -> (ServerGuard, Vec<Mock>) {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    mocks.push(
        server
            .mock("GET", "/contents/components")
            .with_status(200)
            .with_body(
                r#"[
                    {"name": "button.md", "type": "file"},
                    {"name": "input.md", "type": "file"},
                    {"name": "form.md", "type": "file"},
                    {"name": "card.md", "type": "file"}
                ]"#,
            )
            .create_async()
            .await,
    );
    mocks.push(
        server
            .mock("GET", "/contents/charts")
            .with_status(200)
            .with_body(r#"[{"name": "chart-bar.md", "type": "file"}]"#)
            .create_async()
            .await,
    );
    for name in ["button", "input"] {
        mocks.push(
            server
                .mock("GET", format!("/docs/components/{name}.md").as_str())
                .with_status(200)
                .with_body(usage_doc(&name.to_uppercase()))
                .create_async()
                .await,
        );
    }
    mocks.push(
        server
            .mock("GET", "/docs/components/form.md")
            .with_status(404)
            .create_async()
            .await,
    );
    (server, mocks)
}

fn generator(server: &ServerGuard, llm: Arc<ScriptedLlm>, settings: GenerationSettings) -> UiGenerator {
    let docs = DocsSettings {
        raw_base_url: format!("{}/docs", server.url()),
        listing_api_url: format!("{}/contents", server.url()),
        ..DocsSettings::default()
    };
    UiGenerator::with_parts(
        llm,
        CatalogFetcher::new(&docs).unwrap(),
        DocReader::new(&docs).unwrap(),
        settings,
    )
}

// ============================================================================
// create-ui
// ============================================================================

#[tokio::test]
async fn test_login_form_end_to_end() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Ok(LOGIN_SELECTION.to_string()), Ok(LOGIN_UI.to_string())]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let code = generator
        .create_ui("a login form with email and password fields and a submit button")
        .await
        .unwrap();

    assert!(!code.is_empty());
    for name in ["Button", "Input", "Form"] {
        assert!(code.contains(name));
    }

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);

    let selection = &requests[0];
    assert_eq!(selection.system, FILTER_COMPONENTS);
    assert_eq!(selection.max_tokens, 2000);
    assert!(selection.user.starts_with(
        "<description>a login form with email and password fields and a submit button</description>"
    ));
    assert!(selection.user.contains(r#""components":["button","input","form","card"]"#));
    assert!(selection.user.contains(r#""charts":["chart-bar"]"#));

    let generation = &requests[1];
    assert_eq!(generation.system, CREATE_UI);
    assert_eq!(generation.max_tokens, 8192);
    assert_eq!(generation.max_retries, 2);

    let message = &generation.user;
    let input = message.find("<component name=\"input\">").unwrap();
    let button = message.find("<component name=\"button\">").unwrap();
    let form = message.find("<component name=\"form\">").unwrap();
    assert!(input < button && button < form);
    assert!(!message.contains("chart-bar\">"));

    // Usage-only rendering, examples section excluded.
    assert!(message.contains("````vue\n<INPUT />\n````"));
    assert!(!message.contains("<INPUT extra />"));
    // Failed fetch degrades to an empty doc.
    assert!(message.contains(
        "<component name=\"form\">\n<justification><![CDATA[validation and layout]]></justification>\n<documentation><![CDATA[]]></documentation>"
    ));
}

#[tokio::test]
async fn test_invalid_selection_halts_before_generation() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Ok(
        r#"{"components": [{"name": "button", "necessity": "essential", "justification": "x"}]}"#
            .to_string(),
    )]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let err = generator.create_ui("anything").await.unwrap_err();

    assert!(err.is_schema_error());
    assert_eq!(llm.requests().len(), 1);
}

#[tokio::test]
async fn test_unparseable_selection_is_json_error() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Ok("Sorry, I cannot help with that.".to_string())]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let err = generator.create_ui("anything").await.unwrap_err();
    assert!(err.is_json_repair_error());
}

#[tokio::test]
async fn test_llm_failure_propagates() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Err(Error::Llm {
        message: "provider returned 401".to_string(),
        source: None,
    })]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let err = generator.create_ui("anything").await.unwrap_err();
    assert!(err.is_llm_error());
}

// ============================================================================
// Doc fetching
// ============================================================================

#[tokio::test]
async fn test_threshold_and_truncation() {
    let (server, _mocks) = docs_server().await;
    let selection = r#"{"components": [
        {"name": "button", "necessity": "critical", "justification": "a"},
        {"name": "input", "necessity": "optional", "justification": "b"}
    ], "charts": []}"#;
    let llm = ScriptedLlm::new(vec![Ok(selection.to_string())]);
    let settings = GenerationSettings {
        threshold: Necessity::Important,
        max_doc_chars: 8,
        ..GenerationSettings::default()
    };
    let generator = generator(&server, Arc::clone(&llm), settings);

    let catalog = shadcn_mcp_core::Catalog::default();
    let result = generator.select_components("x", &catalog).await.unwrap();
    let docs = generator.fetch_usage_docs(&result).await;

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "button");
    assert_eq!(docs[0].doc.chars().count(), 8);
}

#[tokio::test]
async fn test_chart_docs_come_after_components() {
    let (mut server, _mocks) = docs_server().await;
    let _chart = server
        .mock("GET", "/docs/charts/chart-bar.md")
        .with_status(200)
        .with_body("# Bar chart\n")
        .create_async()
        .await;
    let selection = r#"{"charts": [{"name": "Chart-Bar", "necessity": "optional", "justification": "stats"}],
        "components": [{"name": "button", "necessity": "critical", "justification": "a"}]}"#;
    let llm = ScriptedLlm::new(vec![Ok(selection.to_string())]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let result = generator
        .select_components("x", &shadcn_mcp_core::Catalog::default())
        .await
        .unwrap();
    let docs = generator.fetch_usage_docs(&result).await;

    let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["button", "chart-bar"]);
    assert_eq!(docs[1].doc, "# Bar chart\n");
}

// ============================================================================
// refine-code
// ============================================================================

#[tokio::test]
async fn test_refine_reads_file() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Ok("<template>refined</template>".to_string())]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "<template><button>Old</button></template>").unwrap();

    let refined = generator
        .refine_code("make the button bigger", file.path(), "the submit button")
        .await
        .unwrap();
    assert_eq!(refined, "<template>refined</template>");

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system, REFINED_UI);
    assert_eq!(requests[0].max_retries, 2);
    assert_eq!(
        requests[0].user,
        "<description>make the button bigger</description>\n<refining-component><template><button>Old</button></template></refining-component>\nthe submit button"
    );
}

#[tokio::test]
async fn test_refine_missing_file_sends_empty_content() {
    let (server, _mocks) = docs_server().await;
    let llm = ScriptedLlm::new(vec![Ok("best effort".to_string())]);
    let generator = generator(&server, Arc::clone(&llm), GenerationSettings::default());

    let refined = generator
        .refine_code("polish", Path::new("/definitely/not/here.vue"), "")
        .await
        .unwrap();

    assert_eq!(refined, "best effort");
    assert!(llm.requests()[0].user.contains("<refining-component></refining-component>"));
}
