use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    loretable_db::health_check(&pool).await.unwrap();

    // Verify all tables exist and are queryable.
    let tables = [
        "users",
        "sessions",
        "characters",
        "campaigns",
        "campaign_members",
        "campaign_invites",
        "campaign_characters",
        "scenes",
        "maps",
        "map_tokens",
        "campaign_handouts",
        "notes",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// Verify the enum types reject values outside the contract sets.
#[sqlx::test(migrations = "./migrations")]
async fn test_enum_types_reject_unknown_values(pool: PgPool) {
    let cases = [
        ("campaign_status", "halted"),
        ("campaign_visibility", "public"),
        ("campaign_role", "superuser"),
        ("membership_status", "banned"),
        ("invite_status", "redeemed"),
        ("token_layer", "hidden"),
    ];

    for (ty, value) in cases {
        let result = sqlx::query(&format!("SELECT '{value}'::{ty}"))
            .execute(&pool)
            .await;
        assert!(result.is_err(), "{ty} must reject '{value}'");
    }
}

/// Verify the contract enum values are all accepted.
#[sqlx::test(migrations = "./migrations")]
async fn test_enum_types_accept_contract_values(pool: PgPool) {
    let cases = [
        (
            "campaign_status",
            vec!["not_started", "in_progress", "paused", "completed", "archived"],
        ),
        ("campaign_visibility", vec!["private", "invite"]),
        ("campaign_role", vec!["viewer", "editor", "owner"]),
        ("membership_status", vec!["pending", "accepted", "revoked"]),
        ("invite_status", vec!["active", "revoked"]),
        ("token_layer", vec!["map", "object", "token", "gm"]),
    ];

    for (ty, values) in cases {
        for value in values {
            sqlx::query(&format!("SELECT '{value}'::{ty}"))
                .execute(&pool)
                .await
                .unwrap_or_else(|e| panic!("{ty} must accept '{value}': {e}"));
        }
    }
}
