//! Recommender behaviour: training artifacts, ranking, filters, and the
//! not-trained condition.

use std::path::PathBuf;

use larder::recommend::{ArtifactPaths, Recommender};
use larder::LarderError;

fn write_corpus(dir: &std::path::Path) -> PathBuf {
    let corpus = serde_json::json!([
        {
            "recipe_id": 1,
            "title": "Masala Omelette",
            "ingredients": ["egg", "onion", "tomato", "chili"],
            "diet_tag": "vegetarian"
        },
        {
            "recipe_id": 2,
            "title": "Tomato Egg Curry",
            "ingredients": "egg, tomato, onion, garam masala",
            "diet_tag": "vegetarian"
        },
        {
            "recipe_id": 3,
            "title": "Garlic Pasta",
            "ingredients": ["pasta", "garlic", "olive oil", "butter"],
            "diet_tag": "vegan"
        },
        {
            "recipe_id": 4,
            "title": "Butter Pasta",
            "ingredients": "pasta; butter; garlic",
            "diet_tag": null
        },
        {
            "recipe_id": 5,
            "title": "Vegan Tomato Soup",
            "ingredients": ["tomato", "onion", "olive oil"],
            "diet_tag": "Vegan"
        }
    ]);
    let path = dir.join("recipes.json");
    std::fs::write(&path, serde_json::to_vec(&corpus).unwrap()).unwrap();
    path
}

fn trained(dir: &std::path::Path) -> Recommender {
    let corpus = write_corpus(dir);
    let recommender = Recommender::new(dir.join("artifacts"));
    let report = recommender.train(&corpus).unwrap();
    assert_eq!(report.recipes, 5);
    assert!(report.vocabulary > 0);
    recommender
}

fn pantry(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn recommend_before_training_is_model_not_trained() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = Recommender::new(dir.path().join("artifacts"));
    let err = recommender.recommend(&pantry(&["egg"]), 5, None).unwrap_err();
    assert!(matches!(err, LarderError::ModelNotTrained));
}

#[test]
fn partial_artifacts_count_as_not_trained() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let paths = ArtifactPaths::in_dir(&dir.path().join("artifacts"));
    std::fs::remove_file(&paths.matrix).unwrap();
    recommender.reload();

    let err = recommender.recommend(&pantry(&["egg"]), 5, None).unwrap_err();
    assert!(matches!(err, LarderError::ModelNotTrained));
}

#[test]
fn pantry_matches_rank_highest() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let ranked = recommender
        .recommend(&pantry(&["egg", "tomato"]), 5, None)
        .unwrap();

    assert_eq!(ranked.len(), 5);
    // The two egg-and-tomato recipes outrank everything else.
    let top_ids: Vec<&str> = ranked[..2].iter().map(|r| r.id.as_str()).collect();
    assert!(top_ids.contains(&"1"));
    assert!(top_ids.contains(&"2"));
    assert!(ranked[0].score > 0.0);
    // Pasta dishes share no terms with the query.
    let pasta = ranked.iter().find(|r| r.id == "3").unwrap();
    assert_eq!(pasta.score, 0.0);
    // Descending by score throughout.
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn recommendations_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let first = recommender
        .recommend(&pantry(&["tomato", "onion"]), 5, None)
        .unwrap();
    let second = recommender
        .recommend(&pantry(&["tomato", "onion"]), 5, None)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_pantry_returns_leading_rows_scored_zero() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let rows = recommender.recommend(&[], 5, None).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    assert!(rows.iter().all(|r| r.score == 0.0));

    let truncated = recommender.recommend(&[], 3, None).unwrap();
    assert_eq!(truncated.len(), 3);
}

#[test]
fn diet_filter_is_case_insensitive_and_exact() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let ranked = recommender
        .recommend(&pantry(&["tomato", "onion"]), 10, Some("vegan"))
        .unwrap();

    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    // Only the rows tagged vegan (any casing) remain; the untagged row
    // and the vegetarian rows are excluded.
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"3"));
    assert!(ids.contains(&"5"));
    // The soup shares query terms, the pasta does not.
    assert_eq!(ranked[0].id, "5");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn unseen_pantry_tokens_score_everything_zero() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());

    let rows = recommender
        .recommend(&pantry(&["dragonfruit"]), 5, None)
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.score == 0.0));
}

#[test]
fn retraining_replaces_the_loaded_index() {
    let dir = tempfile::tempdir().unwrap();
    let recommender = trained(dir.path());
    // Warm the lazy-loaded index.
    recommender.recommend(&pantry(&["egg"]), 5, None).unwrap();

    let smaller = serde_json::json!([
        {"recipe_id": 10, "title": "Egg Rice", "ingredients": ["egg", "rice"]},
        {"recipe_id": 11, "title": "Egg Fried Rice", "ingredients": ["egg", "rice", "soy sauce"]}
    ]);
    let corpus = dir.path().join("smaller.json");
    std::fs::write(&corpus, serde_json::to_vec(&smaller).unwrap()).unwrap();
    recommender.train(&corpus).unwrap();

    let rows = recommender.recommend(&[], 10, None).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["10", "11"]);
}

#[test]
fn corpus_of_unique_ingredients_fails_training() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = serde_json::json!([
        {"recipe_id": 1, "title": "A", "ingredients": ["saffron"]},
        {"recipe_id": 2, "title": "B", "ingredients": ["vanilla"]}
    ]);
    let path = dir.path().join("unique.json");
    std::fs::write(&path, serde_json::to_vec(&corpus).unwrap()).unwrap();

    let recommender = Recommender::new(dir.path().join("artifacts"));
    let err = recommender.train(&path).unwrap_err();
    assert!(matches!(err, LarderError::DataError(_)));
}
