//! Tests to verify that shared types are Send + Sync as required.

use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
use shadcn_mcp_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_domain_types_are_send_sync() {
    assert_send_sync::<Catalog>();
    assert_send_sync::<ComponentDescriptor>();
    assert_send_sync::<FilterResult>();
    assert_send_sync::<UsageDoc>();
    assert_send_sync::<Necessity>();
    assert_send_sync::<NecessityFilter>();
}

#[test]
fn test_config_types_are_send_sync() {
    assert_send_sync::<ServerConfig>();
    assert_send_sync::<LlmSettings>();
    assert_send_sync::<CrawlSettings>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}

#[test]
fn test_llm_trait_object_is_send_sync() {
    assert_send_sync::<CompletionRequest>();
    assert_send_sync::<Box<dyn LlmClient>>();
}
