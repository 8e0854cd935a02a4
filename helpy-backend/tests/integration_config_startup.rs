use std::io::Write;

use helpy_backend::bootstrap::{build_state, pipeline_from_config, BootstrapError};
use helpy_config::Config;

const SEED: &str = r#"{
    "users": [
        {"email": "leandro@email.com", "availability": ["WEDNESDAY"], "role": "HELPER"},
        {"email": "thor@email.com", "role": "SEEKER"}
    ],
    "jobs": [
        {"id": 7, "title": "shopping", "author": "thor@email.com",
         "dueDate": "2020-10-14", "status": "OPEN", "created": "2020-10-01"}
    ]
}"#;

#[tokio::test]
async fn seeded_state_serves_matches() {
    let mut seed = tempfile::NamedTempFile::new().expect("tmpfile");
    seed.write_all(SEED.as_bytes()).unwrap();

    let mut cfg = Config::default();
    cfg.directory.seed_path = Some(seed.path().to_string_lossy().into_owned());

    let state = build_state(&cfg).await.expect("state");
    let helpers = state.engine.find_potential_helpers(7).await.unwrap();
    assert_eq!(helpers.emails().collect::<Vec<_>>(), vec!["leandro@email.com"]);
}

#[tokio::test]
async fn missing_seed_file_fails_startup() {
    let mut cfg = Config::default();
    cfg.directory.seed_path = Some("/definitely/not/here.json".into());
    let err = build_state(&cfg).await.unwrap_err();
    assert!(matches!(err, BootstrapError::Seed(_)));
}

#[test]
fn pipeline_follows_configured_order() {
    let mut cfg = Config::default();
    cfg.matching.criteria = vec!["tag".into(), "weekday".into()];
    assert_eq!(pipeline_from_config(&cfg).unwrap().names(), vec!["tag", "weekday"]);

    cfg.matching.criteria = vec!["distance".into()];
    assert!(pipeline_from_config(&cfg).is_err());
}
