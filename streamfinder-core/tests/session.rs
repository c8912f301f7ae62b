mod common;

use std::collections::BTreeSet;

use common::{Call, ScriptedGateway};
use streamfinder_core::{
    BrowseSession, FilterDefaults, FilterError, FilterUpdate, GatewayError, LoadState,
    SessionError,
};
use streamfinder_model::{MediaKind, MonetizationCategory, SortKey};

fn session(gateway: ScriptedGateway) -> BrowseSession<ScriptedGateway> {
    BrowseSession::new(gateway, FilterDefaults::default())
}

#[tokio::test]
async fn navigation_drives_the_first_request() {
    let mut session = session(ScriptedGateway::new(5, 4));
    session
        .sync_from_navigation("mediaType=tv&genres=18&sortBy=vote_average.desc&page=2")
        .await
        .unwrap();

    let Some(Call::Discover(request)) = session.gateway().calls().pop() else {
        panic!("expected a discover call");
    };
    assert_eq!(request.media_kind, MediaKind::TvShow);
    assert_eq!(request.sort_key, SortKey::VoteAverageDesc);
    assert_eq!(request.genre_ids, BTreeSet::from([18]));
    assert_eq!(request.page, 1);

    let navigation = session.navigation();
    assert_eq!(navigation.get("mediaType"), Some("tv"));
    assert_eq!(navigation.get("region"), Some("AU"));
    assert_eq!(navigation.get("page"), Some("2"));
    assert!(!navigation.contains_key("providers"));
}

#[tokio::test]
async fn navigation_page_never_skips_the_first_page() {
    let mut session = session(ScriptedGateway::new(5, 2));
    session.sync_from_navigation("page=3").await.unwrap();

    let discover_pages = |session: &BrowseSession<ScriptedGateway>| -> Vec<u32> {
        session
            .gateway()
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Discover(request) => Some(request.page),
                _ => None,
            })
            .collect()
    };
    assert_eq!(discover_pages(&session), vec![1]);
    let ids: Vec<_> = session.results().items().iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![0, 1]);

    session.gateway().fail_next(GatewayError::Status {
        status: 500,
        message: "Internal error".to_string(),
    });
    let err = session
        .sync_from_navigation("sortBy=vote_average.desc&page=4")
        .await
        .unwrap_err();
    assert_eq!(err.gateway().and_then(GatewayError::status), Some(500));

    assert!(session.retry().await.unwrap());
    assert_eq!(discover_pages(&session), vec![1, 1, 1]);
    assert_eq!(session.navigation().get("page"), Some("4"));
}

#[tokio::test]
async fn navigation_round_trips_through_the_store() {
    let mut session = session(ScriptedGateway::new(1, 1));
    session
        .apply(
            FilterUpdate::new()
                .providers([337, 8])
                .genres([35])
                .sort(SortKey::RevenueDesc),
        )
        .await
        .unwrap();

    let query = session.navigation().to_query_string();
    let mut other = BrowseSession::new(ScriptedGateway::new(1, 1), FilterDefaults::default());
    other.sync_from_navigation(&query).await.unwrap();

    assert_eq!(other.filters().state(), session.filters().state());
    assert!(query.contains("providers=8%2C337"));
}

#[tokio::test]
async fn malformed_navigation_keeps_previous_state() {
    let mut session = session(ScriptedGateway::new(1, 1));
    session.refresh().await.unwrap();
    let before = session.filters().snapshot();

    let err = session
        .sync_from_navigation("mediaType=documentary")
        .await
        .unwrap_err();
    match err {
        SessionError::Filter(filter) => assert!(filter.is_media_kind()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.filters().snapshot().revision, before.revision);

    let err = session
        .apply(FilterUpdate::new().page(0))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Filter(FilterError::InvalidPage(_))));
}

#[tokio::test]
async fn continuation_walks_until_exhausted() {
    let mut session = session(ScriptedGateway::new(3, 2).with_overlap(1));
    session.refresh().await.unwrap();
    while session.load_more().await.unwrap() {}

    let ids: Vec<_> = session.results().items().iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert!(session.results().is_exhausted());
    assert_eq!(session.gateway().listing_calls(), 3);
    assert!(!session.load_more().await.unwrap());
}

#[tokio::test]
async fn filter_change_resets_results_and_page() {
    let mut session = session(ScriptedGateway::new(4, 3));
    session.refresh().await.unwrap();
    session.load_more().await.unwrap();
    assert_eq!(session.results().len(), 6);

    let snapshot = session
        .apply(FilterUpdate::new().providers([8]))
        .await
        .unwrap();
    assert_eq!(snapshot.state.page_cursor, 1);
    assert_eq!(session.results().len(), 3);
    assert_eq!(session.results().last_page(), Some(1));
}

#[tokio::test]
async fn search_replaces_and_clearing_restores_discover() {
    let mut session = session(ScriptedGateway::new(2, 2));
    session.refresh().await.unwrap();

    session.set_search_query("dune").await.unwrap();
    assert!(
        session
            .results()
            .items()
            .iter()
            .all(|item| item.display_title.starts_with("dune"))
    );
    assert!(session.gateway().calls().contains(&Call::Search {
        text: "dune".to_string(),
        kind: MediaKind::Movie,
        page: 1,
    }));

    session.clear_search().await.unwrap();
    assert!(
        session
            .results()
            .items()
            .iter()
            .all(|item| item.display_title.starts_with("discover"))
    );
    assert!(session.navigation().get("query").is_none());
}

#[tokio::test]
async fn blank_search_yields_empty_terminal_page() {
    let mut session = session(ScriptedGateway::new(2, 2));
    session.set_search_query("   ").await.unwrap();

    assert!(session.results().is_empty());
    assert!(session.results().is_exhausted());
    assert_eq!(session.results().total_pages(), 0);
    assert!(matches!(session.state(), LoadState::Settled));
    assert!(
        !session
            .gateway()
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Search { .. }))
    );
}

#[tokio::test]
async fn gateway_failure_is_surfaced_then_retried() {
    let gateway = ScriptedGateway::new(2, 2);
    gateway.fail_next(GatewayError::Status {
        status: 401,
        message: "Invalid API key".to_string(),
    });
    let mut session = session(gateway);

    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.gateway().and_then(GatewayError::status), Some(401));
    assert!(matches!(session.state(), LoadState::Failed { .. }));

    assert!(session.retry().await.unwrap());
    assert_eq!(session.results().len(), 2);
    assert_eq!(session.gateway().listing_calls(), 2);
}

#[tokio::test]
async fn media_kind_switch_drops_genres() {
    let mut session = session(ScriptedGateway::new(1, 1));
    session.load_genres(MediaKind::Movie).await.unwrap();
    session.apply(FilterUpdate::new().genres([28, 35])).await.unwrap();

    session
        .apply(FilterUpdate::new().media_kind(MediaKind::TvShow))
        .await
        .unwrap();
    assert!(session.filters().state().genre_ids.is_empty());
    assert!(!session.navigation().contains_key("genres"));
}

#[tokio::test]
async fn subscribers_see_each_revision() {
    let mut session = session(ScriptedGateway::new(1, 1));
    let mut updates = session.subscribe();
    let initial = updates.borrow_and_update().revision;

    session
        .apply(FilterUpdate::new().sort(SortKey::ReleaseDateDesc))
        .await
        .unwrap();

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.revision, initial + 1);
    assert_eq!(snapshot.navigation.get("sortBy"), Some("primary_release_date.desc"));
}

#[tokio::test]
async fn detail_exposes_availability_and_external_ids() {
    let session = session(ScriptedGateway::new(1, 1));

    let detail = session.detail(MediaKind::Movie, 550).await.unwrap();
    assert_eq!(detail.detail.runtime_label().as_deref(), Some("2h 5m"));
    let index = detail.availability_index();
    assert_eq!(index.count(MonetizationCategory::Flatrate), 1);
    assert_eq!(index.providers(MonetizationCategory::Rent)[0].provider_id, 2);

    let ids = session.external_ids(MediaKind::Movie, 550).await.unwrap();
    assert_eq!(
        ids.imdb_url().as_deref(),
        Some("https://www.imdb.com/title/tt0000550/")
    );
}
