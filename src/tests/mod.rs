use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::controller::{reduce, AppState, Intent};
use crate::filter::{FilterCriteria, PopulationBand};
use crate::model::Country;
use crate::render::{Content, Key, Theme, EMPTY_MESSAGE};
use crate::source::{self, DataSource, FetchError};

fn wire_json(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"name":{{"common":"Country {i:02}","official":"Republic of {i:02}"}},"cca3":"C{i:02}","region":"{region}","population":{pop},"flags":{{"png":"https://flags.test/{i}.png"}}}}"#,
                region = if i % 2 == 0 { "Europe" } else { "Asia" },
                pop = (i as u64 + 1) * 400_000,
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

fn scenario_dataset() -> Vec<Country> {
    let raw = r#"[
        {"name":{"common":"Aa"},"cca3":"AAA","region":"X","population":500000},
        {"name":{"common":"Ab"},"cca3":"ABB","region":"Y","population":5000000},
        {"name":{"common":"Bc"},"cca3":"BCC","region":"X","population":20000000}
    ]"#;
    source::parse_countries(raw.as_bytes()).unwrap()
}

fn names(state: &AppState<'_>) -> Vec<String> {
    state
        .view
        .filtered
        .iter()
        .map(|c| c.display_name().to_string())
        .collect()
}

#[test]
fn text_then_region_narrows_the_grid() {
    let dataset = scenario_dataset();
    let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
    let state = reduce(state, Intent::SetText("a".to_string()));
    assert_eq!(names(&state), vec!["Aa", "Ab"]);
    let state = reduce(state, Intent::SetRegion(Some("X".to_string())));
    assert_eq!(names(&state), vec!["Aa"]);
}

#[test]
fn forty_five_records_paginate_into_three_pages() {
    let body = wire_json(45);
    let dataset = source::parse_countries(body.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 45);

    let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
    assert_eq!(state.view.page_count(), 3);
    let state = reduce(state, Intent::GoToPage(3));
    assert_eq!(state.view.page().len(), 5);

    let screen = state.screen();
    assert_eq!(screen.cards().len(), 5);
    assert_eq!(screen.cards()[0].name, "Country 40");
    let controls = screen.pagination.unwrap();
    assert_eq!(controls.current, 3);
    assert_eq!(controls.page_count, 3);
}

#[test]
fn every_filter_change_returns_to_page_one() {
    let body = wire_json(45);
    let dataset = source::parse_countries(body.as_bytes()).unwrap();
    let intents = [
        Intent::SetText("country".to_string()),
        Intent::SetRegion(None),
        Intent::SetPopulationBand(PopulationBand::All),
    ];
    for intent in intents {
        let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
        let state = reduce(state, Intent::GoToPage(2));
        assert_eq!(state.view.current_page, 2);
        let state = reduce(state, intent);
        assert_eq!(state.view.current_page, 1);
    }
}

#[test]
fn missing_population_only_survives_the_all_band() {
    let raw = r#"[{"name":{"common":"Nowhere"},"cca3":"NWH","region":"X"}]"#;
    let dataset = source::parse_countries(raw.as_bytes()).unwrap();
    for band in [
        PopulationBand::UnderOneMillion,
        PopulationBand::OneToTenMillion,
        PopulationBand::OverTenMillion,
    ] {
        let criteria = FilterCriteria {
            band,
            ..FilterCriteria::default()
        };
        let state = AppState::new(&dataset, criteria, 20, Theme::Light);
        assert!(state.view.filtered.is_empty());
    }
    let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
    assert_eq!(state.view.filtered.len(), 1);
    assert_eq!(state.screen().cards()[0].population, "N/A");
}

#[test]
fn empty_result_shows_message_and_no_controls() {
    let dataset = scenario_dataset();
    let criteria = FilterCriteria {
        text: "zzz".to_string(),
        ..FilterCriteria::default()
    };
    let state = AppState::new(&dataset, criteria, 20, Theme::Dark);
    let screen = state.screen();
    assert!(matches!(screen.content, Content::Empty));
    assert!(screen.pagination.is_none());
    assert!(screen.to_string().contains(EMPTY_MESSAGE));
}

#[test]
fn card_activation_passes_the_record_through() {
    let dataset = scenario_dataset();
    let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
    let screen = state.screen();
    let card = &screen.cards()[1];
    let by_enter = card.on_key(Key::Enter).unwrap();
    let by_space = card.on_key(Key::Space).unwrap();
    let by_click = card.activate();
    assert!(std::ptr::eq(by_enter.record(), &dataset[1]));
    assert!(std::ptr::eq(by_space.record(), by_click.record()));
    assert!(card.on_key(Key::Char('x')).is_none());
    assert_eq!(state.select(2).unwrap().name, "Ab");
}

async fn unused_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v3.1/all")
}

#[tokio::test]
async fn network_failure_renders_one_message_and_nothing_else() {
    let url = unused_port().await;
    let err = source::load(&DataSource::Url(url), Some(2), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));

    let screen = crate::render::render_fetch_error(&err, Theme::Light);
    assert!(screen.cards().is_empty());
    assert!(screen.pagination.is_none());
    let text = screen.to_string();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("Failed to load countries data:"));
}

#[tokio::test]
async fn served_dataset_flows_into_the_grid() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = wire_json(3);
    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = sock.read(&mut buf).await.unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        sock.write_all(response.as_bytes()).await.unwrap();
    });

    let url = format!("http://{addr}/v3.1/all");
    let dataset = source::load(&DataSource::Url(url), Some(5), None)
        .await
        .unwrap();
    server.await.unwrap();

    let state = AppState::new(&dataset, FilterCriteria::default(), 20, Theme::Light);
    let screen = state.screen();
    assert_eq!(screen.cards().len(), 3);
    assert!(screen.pagination.is_none());
    assert_eq!(screen.cards()[2].flag_url, "https://flags.test/2.png");
}
