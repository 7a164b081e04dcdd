use cms_api::error::ApiError;
use cms_api::usecase::player::{
    CreatePlayerUseCase, DeletePlayerUseCase, GetPlayerByUsernameUseCase, GetPlayerUseCase,
    ListPlayersUseCase, UpdatePlayerInput, UpdatePlayerUseCase,
};
use cms_domain::id::PlayerId;

use crate::helpers::{JEB_UUID, MemoryStore, MockResolver, NOTCH_UUID, test_player, test_team};

fn resolver() -> MockResolver {
    MockResolver::new(&[(NOTCH_UUID, "Notch"), (JEB_UUID, "jeb_")])
}

// ── CreatePlayerUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_player_with_resolved_uuid() {
    let store = MemoryStore::new();
    let usecase = CreatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let player = usecase.execute("Notch".into()).await.unwrap();

    assert_eq!(player.mc_username, "Notch");
    assert_eq!(player.mc_uuid, NOTCH_UUID);
    assert!(player.badges.is_empty());
    assert_eq!(store.players(), vec![player]);
}

#[tokio::test]
async fn should_store_canonical_username_casing() {
    let store = MemoryStore::new();
    let usecase = CreatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let created = usecase.execute("nOtCh".into()).await.unwrap();
    assert_eq!(created.mc_username, "Notch");

    let found = GetPlayerByUsernameUseCase { repo: store }
        .execute("Notch")
        .await
        .unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn should_reject_existing_username_without_resolving_or_writing() {
    let store = MemoryStore::new().with_players(vec![test_player("Notch", NOTCH_UUID)]);
    let resolver = resolver();
    let usecase = CreatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver.clone(),
    };

    let result = usecase.execute("Notch".into()).await;

    assert!(
        matches!(result, Err(ApiError::PlayerAlreadyExists(ref name)) if name == "Notch"),
        "expected PlayerAlreadyExists, got {result:?}"
    );
    assert_eq!(resolver.calls(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_minecraft_account() {
    let store = MemoryStore::new();
    let usecase = CreatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase.execute("nobody_here".into()).await;

    assert!(matches!(result, Err(ApiError::McAccountNotFound(_))));
    assert!(store.players().is_empty());
}

#[tokio::test]
async fn should_reject_create_when_resolved_uuid_is_already_held() {
    // Account renamed since the record was stored.
    let store = MemoryStore::new().with_players(vec![test_player("OldName", NOTCH_UUID)]);
    let usecase = CreatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase.execute("Notch".into()).await;

    assert!(matches!(result, Err(ApiError::McUuidTaken(ref uuid)) if uuid == NOTCH_UUID));
    assert_eq!(store.players().len(), 1);
}

// ── Get / List ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_player_by_id_and_username() {
    let notch = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![notch.clone()]);

    let by_id = GetPlayerUseCase { repo: store.clone() }
        .execute(notch.id)
        .await
        .unwrap();
    let by_name = GetPlayerByUsernameUseCase { repo: store.clone() }
        .execute("Notch")
        .await
        .unwrap();

    assert_eq!(by_id, notch);
    assert_eq!(by_name, notch);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_username() {
    let usecase = GetPlayerByUsernameUseCase {
        repo: MemoryStore::new(),
    };
    let result = usecase.execute("ghost").await;
    assert!(matches!(result, Err(ApiError::PlayerUsernameNotFound(_))));
}

#[tokio::test]
async fn should_list_all_players() {
    let store = MemoryStore::new().with_players(vec![
        test_player("Notch", NOTCH_UUID),
        test_player("jeb_", JEB_UUID),
    ]);
    let players = ListPlayersUseCase { repo: store }.execute().await.unwrap();
    assert_eq!(players.len(), 2);
}

// ── UpdatePlayerUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_uuid_when_username_supplied() {
    let stale = test_player("Notch", "00000000000000000000000000000000");
    let store = MemoryStore::new().with_players(vec![stale.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let updated = usecase
        .execute(
            stale.id,
            UpdatePlayerInput {
                mc_username: Some("Notch".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.mc_username, "Notch");
    assert_eq!(updated.mc_uuid, NOTCH_UUID);
    assert_eq!(store.player(stale.id).unwrap().mc_uuid, NOTCH_UUID);
}

#[tokio::test]
async fn should_prefer_resolved_uuid_over_supplied_uuid() {
    let player = test_player("someone", "00000000000000000000000000000000");
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let updated = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                mc_username: Some("Notch".into()),
                mc_uuid: Some(JEB_UUID.into()),
                badges: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.mc_uuid, NOTCH_UUID);
}

#[tokio::test]
async fn should_return_not_found_when_new_username_does_not_resolve() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                mc_username: Some("ghost".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::McAccountNotFound(ref name)) if name == "ghost"));
    assert_eq!(store.player(player.id).unwrap(), player);
}

#[tokio::test]
async fn should_reject_uuid_held_by_another_player_and_leave_target_unchanged() {
    let notch = test_player("Notch", NOTCH_UUID);
    let jeb = test_player("jeb_", JEB_UUID);
    let store = MemoryStore::new().with_players(vec![notch.clone(), jeb.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase
        .execute(
            jeb.id,
            UpdatePlayerInput {
                mc_uuid: Some(NOTCH_UUID.into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::McUuidTaken(_))));
    assert_eq!(store.player(jeb.id).unwrap(), jeb);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn should_resync_username_when_own_uuid_supplied() {
    // Dashed, upper-case spelling of the player's own UUID.
    let player = test_player("OldName", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let updated = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                mc_uuid: Some("069A79F4-44E9-4726-A5BE-FCA90E38AAF5".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.mc_username, "Notch");
    assert_eq!(updated.mc_uuid, NOTCH_UUID);
}

#[tokio::test]
async fn should_return_not_found_when_uuid_does_not_reverse_resolve() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                mc_uuid: Some("ffffffffffffffffffffffffffffffff".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::McUuidNotFound(_))));
    assert_eq!(store.player(player.id).unwrap(), player);
}

#[tokio::test]
async fn should_reject_malformed_uuid_without_resolving() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let resolver = resolver();
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver.clone(),
    };

    let result = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                mc_uuid: Some("not-a-uuid".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::McUuidNotFound(ref raw)) if raw == "not-a-uuid"));
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn should_replace_badges_without_resolving() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let resolver = resolver();
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver.clone(),
    };

    let updated = usecase
        .execute(
            player.id,
            UpdatePlayerInput {
                badges: Some(vec![2, 1, 2]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.badges, vec![2, 1, 2]);
    assert_eq!(updated.mc_username, "Notch");
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn should_return_current_record_when_nothing_to_change() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);
    let usecase = UpdatePlayerUseCase {
        repo: store.clone(),
        resolver: resolver(),
    };

    let result = usecase
        .execute(player.id, UpdatePlayerInput::default())
        .await
        .unwrap();

    assert_eq!(result, player);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_player() {
    let usecase = UpdatePlayerUseCase {
        repo: MemoryStore::new(),
        resolver: resolver(),
    };
    let id = PlayerId::generate();

    let result = usecase.execute(id, UpdatePlayerInput::default()).await;

    assert!(matches!(result, Err(ApiError::PlayerNotFound(missing)) if missing == id));
}

// ── DeletePlayerUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_player_then_report_not_found() {
    let player = test_player("Notch", NOTCH_UUID);
    let store = MemoryStore::new().with_players(vec![player.clone()]);

    DeletePlayerUseCase { repo: store.clone() }
        .execute(player.id)
        .await
        .unwrap();

    let result = GetPlayerUseCase { repo: store.clone() }
        .execute(player.id)
        .await;
    assert!(matches!(result, Err(ApiError::PlayerNotFound(_))));
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_player() {
    let result = DeletePlayerUseCase {
        repo: MemoryStore::new(),
    }
    .execute(PlayerId::generate())
    .await;
    assert!(matches!(result, Err(ApiError::PlayerNotFound(_))));
}

#[tokio::test]
async fn should_drop_deleted_player_from_rosters() {
    let notch = test_player("Notch", NOTCH_UUID);
    let jeb = test_player("jeb_", JEB_UUID);
    let mut team = test_team("Alpha", "A");
    team.players = vec![notch.id, jeb.id];
    let store = MemoryStore::new()
        .with_players(vec![notch.clone(), jeb.clone()])
        .with_teams(vec![team]);

    DeletePlayerUseCase { repo: store.clone() }
        .execute(notch.id)
        .await
        .unwrap();

    assert_eq!(store.teams()[0].players, vec![jeb.id]);
}
