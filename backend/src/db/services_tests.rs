#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::api::RoomId;
    use crate::db::repositories::LocalRepository;
    use crate::db::services;
    use crate::services::mock_data::MockDataConfig;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_seed_then_read_back() {
        let repo = LocalRepository::new();
        let mut rng = StdRng::seed_from_u64(3);
        let config = MockDataConfig {
            enabled: true,
            room_count: 2,
            months: 1,
        };

        let report = services::seed_mock_rooms(&repo, &mut rng, &config, ymd(2024, 2, 1))
            .await
            .unwrap();

        assert_eq!(report.rooms.len(), 2);
        // February 2024 has 29 days
        assert_eq!(report.records_generated, 58);
        assert_eq!(report.records_inserted, 58);

        let mut expected = report.rooms.clone();
        expected.sort();
        assert_eq!(services::list_room_ids(&repo).await.unwrap(), expected);

        let series =
            services::fetch_day_series(&repo, &expected[0], ymd(2024, 2, 1), ymd(2024, 2, 29))
                .await
                .unwrap();
        assert_eq!(series.len(), 29);
    }

    #[tokio::test]
    async fn test_reseeding_same_rooms_inserts_nothing() {
        let repo = LocalRepository::new();
        let config = MockDataConfig {
            enabled: true,
            room_count: 3,
            months: 1,
        };

        let mut rng = StdRng::seed_from_u64(9);
        services::seed_mock_rooms(&repo, &mut rng, &config, ymd(2024, 6, 1))
            .await
            .unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let replay = services::seed_mock_rooms(&repo, &mut rng, &config, ymd(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(replay.records_generated, 90);
        assert_eq!(replay.records_inserted, 0);
    }

    #[tokio::test]
    async fn test_health_check_passthrough() {
        let repo = LocalRepository::new();
        assert!(services::health_check(&repo).await.unwrap());
        repo.set_healthy(false);
        assert!(!services::health_check(&repo).await.unwrap());
        assert!(services::list_room_ids(&repo).await.is_err());

        let missing = services::fetch_day_series(
            &LocalRepository::new(),
            &RoomId::new("A101"),
            ymd(2024, 6, 1),
            ymd(2024, 6, 30),
        )
        .await
        .unwrap();
        assert!(missing.is_empty());
    }
}
