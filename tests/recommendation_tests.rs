use std::sync::Arc;

use questlog_recs::services::providers::InMemoryCatalog;
use questlog_recs::services::Vectorizer;
use questlog_recs::{Game, GameStatus, RecommendationModel, RecommendationService};

const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/model.json");

// 2017-03-03T00:00:00Z
const MARCH_2017: i64 = 1_488_499_200;
// 2015-01-01T00:00:00Z
const JANUARY_2015: i64 = 1_420_070_400;

fn load_model() -> Arc<RecommendationModel> {
    Arc::new(RecommendationModel::load(MODEL_PATH).unwrap())
}

fn fantasy_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        Game {
            genres: vec![12],
            themes: vec![1],
            summary: Some("Explore the dungeon".to_string()),
            storyline: Some("The kingdom awaits".to_string()),
            first_release_date: Some(MARCH_2017),
            rating: Some(90.0),
            rating_count: Some(800),
            cluster_id: Some(0),
            ..Game::new(1, "Dungeon Lord")
        },
        Game {
            genres: vec![12],
            themes: vec![1],
            storyline: Some("A kingdom in peril".to_string()),
            first_release_date: Some(JANUARY_2015),
            rating: Some(78.0),
            rating_count: Some(120),
            cluster_id: Some(0),
            ..Game::new(2, "Kingdom Tales")
        },
        Game {
            genres: vec![12],
            summary: Some("A dungeon crawler".to_string()),
            rating: Some(70.0),
            rating_count: Some(30),
            cluster_id: Some(0),
            ..Game::new(3, "Crypt Crawler")
        },
        Game {
            genres: vec![31],
            rating_count: Some(10),
            cluster_id: Some(0),
            ..Game::new(4, "Tiny Farm")
        },
        Game {
            genres: vec![5],
            themes: vec![17],
            summary: Some("Arena shooter".to_string()),
            cluster_id: Some(1),
            ..Game::new(5, "Arena Blast")
        },
        Game {
            genres: vec![5],
            summary: Some("A neon shooter".to_string()),
            cluster_id: Some(1),
            ..Game::new(6, "Neon Shooter")
        },
        Game {
            genres: vec![12],
            ..Game::new(7, "Unclustered Quest")
        },
    ])
}

fn service(catalog: InMemoryCatalog) -> RecommendationService {
    let catalog = Arc::new(catalog);
    RecommendationService::new(load_model(), catalog.clone(), catalog, 100)
}

#[test]
fn test_fixture_model_loads() {
    let model = load_model();
    assert_eq!(model.dimension(), 17);
    assert_eq!(model.cluster_count(), 3);
}

#[tokio::test]
async fn test_fantasy_fan_gets_fantasy_games_ranked_by_overlap() {
    let mut catalog = fantasy_catalog();
    catalog.track(1, 1, GameStatus::Liked);

    let result = service(catalog).recommend_for_user(1).await.unwrap();

    let ranked: Vec<(i64, f64)> = result.iter().map(|r| (r.id, r.score)).collect();
    assert_eq!(ranked, vec![(2, 4.0), (3, 2.0)]);
    assert_eq!(result[0].name, "Kingdom Tales");
}

#[tokio::test]
async fn test_shooter_fan_is_routed_to_shooter_cluster() {
    let mut catalog = fantasy_catalog();
    catalog.track(2, 5, GameStatus::Liked);

    let result = service(catalog).recommend_for_user(2).await.unwrap();

    let ids: Vec<i64> = result.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![6]);
    assert_eq!(result[0].score, 2.0);
}

#[tokio::test]
async fn test_played_and_wishlisted_games_are_not_recommended() {
    let mut catalog = fantasy_catalog();
    catalog.track(3, 1, GameStatus::Liked);
    catalog.track(3, 2, GameStatus::Played);
    catalog.track(3, 3, GameStatus::WantsToPlay);

    let result = service(catalog).recommend_for_user(3).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_user_with_no_likes_gets_zero_profile_and_no_recommendations() {
    let service = service(fantasy_catalog());

    let profile = service.build_user_profile_vector(42).await.unwrap();
    assert_eq!(profile.len(), 17);
    assert!(profile.iter().all(|v| *v == 0.0));

    let result = service.get_recommendations(&profile, &[]).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_liked_game_deleted_from_catalog_degrades_to_zero_profile() {
    let mut catalog = fantasy_catalog();
    catalog.track(4, 999, GameStatus::Liked);

    let service = service(catalog);
    let profile = service.build_user_profile_vector(4).await.unwrap();
    assert!(profile.iter().all(|v| *v == 0.0));
    assert!(service.recommend_for_user(4).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_averages_liked_games() {
    let mut catalog = fantasy_catalog();
    catalog.track(5, 1, GameStatus::Liked);
    catalog.track(5, 3, GameStatus::Liked);

    let service = service(catalog);
    let profile = service.build_user_profile_vector(5).await.unwrap();
    let vocabulary = service.model().vocabulary();

    let genre_12 = vocabulary.index_of("genres_12").unwrap();
    let acclaimed = vocabulary.index_of("rating_tier_acclaimed").unwrap();
    let niche = vocabulary.index_of("rating_count_tier_niche").unwrap();
    assert_eq!(profile[genre_12], 1.0);
    assert_eq!(profile[acclaimed], 0.5);
    assert_eq!(profile[niche], 0.5);
}

#[tokio::test]
async fn test_large_cluster_is_capped_at_one_hundred_sorted_results() {
    let mut catalog = InMemoryCatalog::default();
    for id in 1..=150 {
        let rating = if id % 3 == 0 { 90.0 } else { 50.0 };
        catalog.insert(Game {
            genres: vec![12],
            themes: vec![1],
            rating: Some(rating),
            cluster_id: Some(0),
            ..Game::new(id, format!("Quest {}", id))
        });
    }
    catalog.insert(Game {
        genres: vec![12],
        themes: vec![1],
        rating: Some(90.0),
        cluster_id: Some(0),
        ..Game::new(1_000, "Seed")
    });
    catalog.track(6, 1_000, GameStatus::Liked);

    let result = service(catalog).recommend_for_user(6).await.unwrap();

    assert_eq!(result.len(), 100);
    assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(result.iter().all(|r| r.score > 0.0 && r.id != 1_000));
    // 50 acclaimed games score 3, the rest 2; ties keep catalog order
    assert_eq!(result[0].id, 3);
    assert_eq!(result[49].id, 150);
    assert_eq!(result[50].id, 1);
}

#[test]
fn test_vectorize_is_pure_and_fixed_length() {
    let vectorizer = Vectorizer::new(load_model());
    let game = Game {
        genres: vec![12, 31, 999],
        platforms: vec![6],
        franchise: Some(7),
        // 1993-12-07T00:00:00Z
        first_release_date: Some(755_222_400),
        ..Game::new(10, "Retro")
    };

    let first = vectorizer.vectorize(&game);
    let second = vectorizer.vectorize(&game);
    assert_eq!(first.len(), 17);
    assert_eq!(first, second);
    assert_eq!(first.iter().filter(|v| **v == 1.0).count(), 5);
}
