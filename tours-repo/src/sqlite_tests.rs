//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use tours_types::{
        CreateTourRequest, CustomerId, Difficulty, DomainError, NewRating, RatingId,
        RatingRepository, Region, RepoError, TourCatalog, TourId,
    };

    use crate::{SqliteRepo, build_repo};

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn tour_request(title: &str) -> CreateTourRequest {
        CreateTourRequest {
            title: title.to_string(),
            description: "Coastal hike".to_string(),
            price: 750,
            duration: "3 days".to_string(),
            package_code: "BC".to_string(),
            difficulty: Difficulty::Medium,
            region: Region::CentralCoast,
        }
    }

    async fn setup_tour(repo: &SqliteRepo) -> TourId {
        repo.create_tour(tour_request("Big Sur Retreat"))
            .await
            .unwrap()
            .id
    }

    fn new_rating(tour_id: TourId, customer: i64, score: i32) -> NewRating {
        NewRating::new(tour_id, CustomerId(customer), score, None)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Tour catalog
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_and_get_tour() {
        let repo = setup_repo().await;

        let created = repo.create_tour(tour_request("Big Sur Retreat")).await.unwrap();
        let fetched = repo.get_tour(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.region, Region::CentralCoast);
        assert_eq!(fetched.difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_region_persisted_by_label() {
        let repo = setup_repo().await;
        let mut req = tour_request("Channel Islands Excursion");
        req.region = Region::SouthernCalifornia;
        let tour = repo.create_tour(req).await.unwrap();

        let label: String = sqlx::query_scalar("SELECT region FROM tours WHERE id = ?")
            .bind(tour.id.get())
            .fetch_one(repo.pool())
            .await
            .unwrap();

        assert_eq!(label, "Southern California");
    }

    #[tokio::test]
    async fn test_get_tour_not_found() {
        let repo = setup_repo().await;

        assert!(repo.get_tour(TourId(999)).await.unwrap().is_none());
        assert!(!repo.tour_exists(TourId(999)).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_tour_blank_title_fails() {
        let repo = setup_repo().await;

        let result = repo.create_tour(tour_request("   ")).await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::ValidationError(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_tours() {
        let repo = setup_repo().await;
        repo.create_tour(tour_request("One")).await.unwrap();
        repo.create_tour(tour_request("Two")).await.unwrap();

        let tours = repo.list_tours().await.unwrap();

        assert_eq!(tours.len(), 2);
        assert_eq!(tours[0].title, "One");
        assert_eq!(tours[1].title, "Two");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Single-row rating operations
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_insert_and_find_rating() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;

        let created = repo
            .insert(NewRating::new(
                tour_id,
                CustomerId(456),
                2,
                Some("It was OK".into()),
            ))
            .await
            .unwrap();

        let by_pair = repo
            .find_by_tour_and_customer(tour_id, CustomerId(456))
            .await
            .unwrap()
            .unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(by_pair, created);
        assert_eq!(by_id, created);
        assert_eq!(created.comment.as_deref(), Some("It was OK"));
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_integrity_violation() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;

        let original = repo.insert(new_rating(tour_id, 1, 5)).await.unwrap();
        let result = repo.insert(new_rating(tour_id, 1, 1)).await;

        assert!(matches!(result, Err(RepoError::DataIntegrity(_))));

        let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.score, 5);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_for_missing_tour_is_integrity_violation() {
        let repo = setup_repo().await;

        let result = repo.insert(new_rating(TourId(999), 1, 3)).await;

        assert!(matches!(result, Err(RepoError::DataIntegrity(_))));
    }

    #[tokio::test]
    async fn test_update_rating() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;
        let mut rating = repo.insert(new_rating(tour_id, 7, 3)).await.unwrap();

        rating.revise(1, Some("one".into()));
        repo.update(&rating).await.unwrap();

        let stored = repo.find_by_id(rating.id).await.unwrap().unwrap();
        assert_eq!(stored.score, 1);
        assert_eq!(stored.comment.as_deref(), Some("one"));
        assert_eq!(stored.tour_id, tour_id);
        assert_eq!(stored.customer_id, CustomerId(7));
    }

    #[tokio::test]
    async fn test_update_missing_rating() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;
        let mut rating = repo.insert(new_rating(tour_id, 7, 3)).await.unwrap();
        repo.delete(rating.id).await.unwrap();

        rating.revise(4, None);
        let result = repo.update(&rating).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_rating() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;
        let first = repo.insert(new_rating(tour_id, 1, 4)).await.unwrap();
        repo.insert(new_rating(tour_id, 2, 5)).await.unwrap();

        repo.delete(first.id).await.unwrap();

        let remaining = repo.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].customer_id, CustomerId(2));
    }

    #[tokio::test]
    async fn test_delete_missing_rating() {
        let repo = setup_repo().await;

        let result = repo.delete(RatingId(12345)).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_all_by_tour() {
        let repo = setup_repo().await;
        let big_sur = setup_tour(&repo).await;
        let other = repo
            .create_tour(tour_request("Monterey Highlights"))
            .await
            .unwrap()
            .id;

        repo.insert(new_rating(big_sur, 1, 5)).await.unwrap();
        repo.insert(new_rating(other, 1, 2)).await.unwrap();
        repo.insert(new_rating(big_sur, 2, 4)).await.unwrap();

        let ratings = repo.find_all_by_tour(big_sur).await.unwrap();

        assert_eq!(ratings.len(), 2);
        assert!(ratings.iter().all(|r| r.tour_id == big_sur));
        assert!(ratings[0].id < ratings[1].id);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Batch inserts
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_insert_batch() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;

        let batch = (100..=102).map(|c| new_rating(tour_id, c, 5)).collect();
        let stored = repo.insert_batch(batch).await.unwrap();

        assert_eq!(stored.len(), 3);
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|r| r.score == 5 && r.comment.is_none()));
    }

    #[tokio::test]
    async fn test_insert_batch_rolls_back_on_duplicate() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;
        repo.insert(new_rating(tour_id, 102, 1)).await.unwrap();

        // 100 and 101 would succeed on their own; 102 already exists.
        let batch = (100..=102).map(|c| new_rating(tour_id, c, 3)).collect();
        let result = repo.insert_batch(batch).await;

        assert!(matches!(result, Err(RepoError::DataIntegrity(_))));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].customer_id, CustomerId(102));
        assert!(
            repo.find_by_tour_and_customer(tour_id, CustomerId(100))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_insert_batch_twice_leaves_count_unchanged() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;
        let batch: Vec<_> = (100..=102).map(|c| new_rating(tour_id, c, 3)).collect();

        repo.insert_batch(batch.clone()).await.unwrap();
        let before = repo.find_all().await.unwrap().len();

        let result = repo.insert_batch(batch).await;

        assert!(matches!(result, Err(RepoError::DataIntegrity(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_insert_batch_duplicate_within_input() {
        let repo = setup_repo().await;
        let tour_id = setup_tour(&repo).await;

        let batch = vec![
            new_rating(tour_id, 1, 4),
            new_rating(tour_id, 2, 4),
            new_rating(tour_id, 1, 4),
        ];
        let result = repo.insert_batch(batch).await;

        assert!(matches!(result, Err(RepoError::DataIntegrity(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let repo = setup_repo().await;

        let stored = repo.insert_batch(Vec::new()).await.unwrap();

        assert!(stored.is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Repo wrapper
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_build_repo_from_sqlite_url() {
        let repo = build_repo("sqlite::memory:").await.unwrap();
        assert_eq!(repo.backend_name(), "sqlite");

        let tour = repo.create_tour(tour_request("Via Repo")).await.unwrap();
        repo.insert(new_rating(tour.id, 1, 5)).await.unwrap();

        assert_eq!(repo.find_all_by_tour(tour.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_build_repo_rejects_unknown_scheme() {
        let result = build_repo("mysql://localhost/tours").await;
        assert!(result.is_err());
    }
}
