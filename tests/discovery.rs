mod common;

use std::sync::Arc;

use common::{group, message, ScriptedClient};
use vigil::classifier::Classifier;
use vigil::config::VigilConfig;
use vigil::db::Database;
use vigil::discovery::{BotSearcher, ChannelDiscoverer};
use vigil::monitor::{AlertDispatcher, AlertTarget, ChannelRiskAggregator, MessagePipeline};
use vigil::platform::Entity;

fn discoverer(client: Arc<ScriptedClient>, db: Database) -> ChannelDiscoverer<ScriptedClient> {
    ChannelDiscoverer::new(
        client,
        Arc::new(Classifier::new()),
        db,
        VigilConfig::default().discovery_settings(),
    )
}

fn named_group(handle: &str, title: &str, description: &str) -> Entity {
    Entity::Group {
        id: 50,
        handle: Some(handle.to_string()),
        title: title.to_string(),
        member_count: 10,
        description: description.to_string(),
    }
}

#[tokio::test]
async fn test_discovery_saves_suspicious_titles() {
    let client = Arc::new(
        ScriptedClient::default()
            .with_dialog(named_group("shop", "Меф и гашиш по городу", ""), vec![])
            .with_dialog(named_group("books", "Книжный клуб", ""), vec![]),
    );
    let db = Database::in_memory().unwrap();

    let found = discoverer(client, db.clone()).discover().await.unwrap();

    assert_eq!(found, 1);
    let profile = db.get_profile("shop").unwrap().unwrap();
    assert_eq!(profile["discovery_method"], "auto_discovery");
    let risk = profile["risk_score"].as_f64().unwrap();
    assert!((risk - 0.4).abs() < 1e-9);

    // clean source stays out of the store
    assert!(db.get_profile("books").unwrap().is_none());
}

#[tokio::test]
async fn test_discovery_scores_title_and_description() {
    let client = Arc::new(ScriptedClient::default().with_dialog(
        named_group("combo", "Закладки от лучших", "кокаин дешево"),
        vec![],
    ));
    let db = Database::in_memory().unwrap();

    discoverer(client, db.clone()).discover().await.unwrap();

    let profile = db.get_profile("combo").unwrap().unwrap();
    let risk = profile["risk_score"].as_f64().unwrap();
    assert!((risk - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn test_bot_probe_feeds_candidates_through_pipeline() {
    let classifier = Arc::new(Classifier::new());
    let db = Database::in_memory().unwrap();

    let client = Arc::new(
        ScriptedClient::default()
            .with_resolvable(
                "dir_bot",
                group("dir_bot", "Directory bot"),
                vec![message(1, "попробуй t.me/promo_channel")],
            )
            .with_resolvable(
                "promo_channel",
                group("promo_channel", "Promo"),
                vec![message(2, "продам гашиш"), message(3, "просто текст")],
            ),
    );

    let limits = VigilConfig::default().limits();
    let aggregator =
        ChannelRiskAggregator::new(client.clone(), classifier.clone(), db.clone(), &limits);
    let alerts = AlertDispatcher::new(client.clone(), AlertTarget::new(Some("@alerts".into())));
    let pipeline = Arc::new(MessagePipeline::new(
        classifier.clone(),
        db.clone(),
        aggregator,
        alerts,
    ));

    let searcher = BotSearcher::new(
        client.clone(),
        classifier,
        pipeline,
        vec!["dir_bot".to_string()],
        3600,
    );
    searcher.probe_all().await;

    assert_eq!(db.count_flagged_messages("promo_channel").unwrap(), 1);
    let profile = db.get_profile("promo_channel").unwrap().unwrap();
    assert_eq!(profile["discovery_method"], "bot_dir_bot");

    // the /start poke plus one alert
    let sent = client.sent_messages();
    assert!(sent.iter().any(|(dest, text)| dest == "dir_bot" && text == "/start"));
    assert!(sent.iter().any(|(dest, _)| dest == "@alerts"));
}
