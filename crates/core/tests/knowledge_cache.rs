//! Daily knowledge card caching

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use healthprod_core::assistant::AssistantService;
use healthprod_core::knowledge::KnowledgeCardCache;
use healthprod_domain::constants::{KNOWLEDGE_CARD_DATE_KEY, KNOWLEDGE_CARD_KEY};
use healthprod_domain::{KnowledgeCard, KnowledgeCategory};
use support::gateway::StubGateway;
use support::storage::MockKeyValueStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn card() -> KnowledgeCard {
    KnowledgeCard {
        title: "Two-minute rule".into(),
        content: "If it takes less than two minutes, do it now.".into(),
        category: KnowledgeCategory::ProductivityHack,
    }
}

fn cached_store(date: &str) -> MockKeyValueStore {
    MockKeyValueStore::new()
        .with_entry(KNOWLEDGE_CARD_KEY, &serde_json::to_string(&card()).unwrap())
        .with_entry(KNOWLEDGE_CARD_DATE_KEY, date)
}

#[tokio::test]
async fn returns_card_cached_today_without_gateway_call() {
    let gateway = StubGateway::with_card(KnowledgeCard::fallback());
    let cache = KnowledgeCardCache::new(Arc::new(cached_store("2026-10-16")));
    let assistant = AssistantService::new(Arc::new(gateway.clone()));

    assert_eq!(cache.today(&assistant, today(), true).await, Some(card()));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn card_from_yesterday_is_absent() {
    let cache = KnowledgeCardCache::new(Arc::new(cached_store("2026-10-15")));
    assert_eq!(cache.cached(today()).await, None);
}

#[tokio::test]
async fn fetches_and_stores_when_online() {
    let store = cached_store("2026-10-15");
    let cache = KnowledgeCardCache::new(Arc::new(store.clone()));
    let fresh = KnowledgeCard { title: "Fresh".into(), ..card() };
    let assistant = AssistantService::new(Arc::new(StubGateway::with_card(fresh.clone())));

    assert_eq!(cache.today(&assistant, today(), true).await, Some(fresh.clone()));
    assert_eq!(store.value(KNOWLEDGE_CARD_DATE_KEY).as_deref(), Some("2026-10-16"));
    assert_eq!(cache.cached(today()).await, Some(fresh));
}

#[tokio::test]
async fn offline_without_cache_yields_nothing() {
    let gateway = StubGateway::with_card(card());
    let cache = KnowledgeCardCache::new(Arc::new(MockKeyValueStore::new()));
    let assistant = AssistantService::new(Arc::new(gateway.clone()));

    assert_eq!(cache.today(&assistant, today(), false).await, None);
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn fallback_card_is_shown_but_not_cached() {
    let store = MockKeyValueStore::new();
    let cache = KnowledgeCardCache::new(Arc::new(store.clone()));
    let assistant = AssistantService::new(Arc::new(StubGateway::failing()));

    assert_eq!(cache.today(&assistant, today(), true).await, Some(KnowledgeCard::fallback()));
    assert_eq!(store.value(KNOWLEDGE_CARD_KEY), None);
}

#[tokio::test]
async fn storage_failure_degrades_to_absent() {
    let cache = KnowledgeCardCache::new(Arc::new(MockKeyValueStore::failing()));
    let assistant = AssistantService::new(Arc::new(StubGateway::with_card(card())));

    assert_eq!(cache.cached(today()).await, None);
    assert_eq!(cache.today(&assistant, today(), true).await, Some(card()));
}

#[tokio::test]
async fn corrupt_payload_is_treated_as_absent() {
    let store = MockKeyValueStore::new()
        .with_entry(KNOWLEDGE_CARD_KEY, "{not json")
        .with_entry(KNOWLEDGE_CARD_DATE_KEY, "2026-10-16");
    let cache = KnowledgeCardCache::new(Arc::new(store));
    assert_eq!(cache.cached(today()).await, None);
}
