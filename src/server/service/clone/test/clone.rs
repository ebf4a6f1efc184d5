use super::*;

/// Seeds the source guild with two categories, one child each, and one role.
fn seed_scenario_source(fake: &FakeDiscordApi) {
    fake.add_channel(SOURCE_GUILD, channel(10, SOURCE_GUILD, "General", CATEGORY, None));
    fake.add_channel(SOURCE_GUILD, channel(11, SOURCE_GUILD, "Voice", CATEGORY, None));
    fake.add_channel(SOURCE_GUILD, channel(12, SOURCE_GUILD, "chat", TEXT, Some(10)));
    fake.add_channel(SOURCE_GUILD, channel(13, SOURCE_GUILD, "lounge", VOICE, Some(11)));
    fake.add_role(SOURCE_GUILD, role(1, "@everyone", 0));
    fake.add_role(SOURCE_GUILD, role(20, "Helper", 1));
}

/// Tests a non-destructive clone into an empty target.
///
/// Verifies that both categories, both child channels under their recreated
/// categories, and the single non-default role are created.
///
/// Expected: Ok with 2 categories, 2 channels, 1 role and no errors
#[tokio::test]
async fn clones_into_empty_target() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);

    let report = service(&fake)
        .clone(&clone_params(false, None), &context())
        .await
        .unwrap();

    assert!(report.errors().is_empty());
    assert_eq!(channel_creates(&fake).len(), 4);
    assert_eq!(
        parent_of(&fake, "chat"),
        created_id_of(&fake, "General"),
        "chat must sit under the recreated General category"
    );
    assert_eq!(parent_of(&fake, "lounge"), created_id_of(&fake, "Voice"));
    assert_eq!(
        fake.count(|call| matches!(call, FakeCall::CreateRole { payload, .. } if payload.name == "Helper")),
        1
    );
    assert_eq!(fake.count(|call| matches!(call, FakeCall::CreateRole { .. })), 1);
    assert_eq!(fake.count(|call| matches!(call, FakeCall::DeleteChannel(_))), 0);
    assert!(report.render_output().ends_with("Server cloning completed."));
}

/// Tests that the target guild receives the source guild's settings.
///
/// Expected: one PATCH on the target carrying the source name and icon URL
#[tokio::test]
async fn patches_target_with_source_metadata() {
    let fake = fake_with_guilds();

    service(&fake)
        .clone(&clone_params(false, None), &context())
        .await
        .unwrap();

    let patches: Vec<_> = fake
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            FakeCall::EditGuild { guild_id, payload } => Some((guild_id, payload)),
            _ => None,
        })
        .collect();

    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].0, TARGET_GUILD);
    assert_eq!(patches[0].1.name, "Source Guild");
    assert!(patches[0].1.icon_url.is_some());
}

/// Tests a destructive clone over a populated target.
///
/// Verifies that every target channel and every role except `@everyone` is deleted,
/// and that all deletes are issued before the first create.
///
/// Expected: 3 channel deletes, 1 role delete, deletes precede creates
#[tokio::test]
async fn destructive_clone_tears_down_first() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    fake.add_channel(TARGET_GUILD, channel(100, TARGET_GUILD, "old-1", TEXT, None));
    fake.add_channel(TARGET_GUILD, channel(101, TARGET_GUILD, "old-2", TEXT, None));
    fake.add_channel(TARGET_GUILD, channel(102, TARGET_GUILD, "old-3", VOICE, None));
    fake.add_role(TARGET_GUILD, role(200, "@everyone", 0));
    fake.add_role(TARGET_GUILD, role(201, "Moderator", 1));

    let report = service(&fake)
        .clone(&clone_params(true, Some(OWNER)), &context())
        .await
        .unwrap();

    assert!(report.errors().is_empty());
    assert_eq!(fake.count(|call| matches!(call, FakeCall::DeleteChannel(_))), 3);
    assert_eq!(fake.count(|call| matches!(call, FakeCall::DeleteRole { .. })), 1);
    assert_eq!(
        fake.count(|call| matches!(call, FakeCall::DeleteRole { role_id: 200, .. })),
        0
    );

    let calls = fake.calls();
    let last_delete = calls
        .iter()
        .rposition(|call| matches!(call, FakeCall::DeleteChannel(_) | FakeCall::DeleteRole { .. }))
        .unwrap();
    let first_create = calls
        .iter()
        .position(|call| matches!(call, FakeCall::CreateChannel { .. } | FakeCall::CreateRole { .. }))
        .unwrap();
    assert!(last_delete < first_create);
}

/// Tests that a caller who does not own the target guild is rejected.
///
/// Expected: Err(AuthErr(NotGuildOwner)) and no mutating calls at all
#[tokio::test]
async fn rejects_non_owner_without_side_effects() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    fake.add_channel(TARGET_GUILD, channel(100, TARGET_GUILD, "old-1", TEXT, None));

    let result = service(&fake)
        .clone(&clone_params(true, Some(999)), &context())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotGuildOwner {
            caller_id: 999,
            guild_id: TARGET_GUILD
        }))
    ));
    assert!(!fake.has_mutations());
}

/// Tests that a failed snapshot read aborts the run.
///
/// Expected: Err(CloneAborted(FetchFailed)) and nothing created
#[tokio::test]
async fn snapshot_failure_aborts() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    fake.fail(FakeOp::GetRoles, Some(SOURCE_GUILD.to_string().as_str()), 503);

    let result = service(&fake)
        .clone(&clone_params(false, None), &context())
        .await;

    match result {
        Err(AppError::CloneAborted { error, .. }) => {
            assert!(matches!(error, CloneError::FetchFailed { endpoint, .. } if endpoint.contains("/roles")));
        }
        other => panic!("expected CloneAborted, got {:?}", other.map(|r| r.errors().to_vec())),
    }
    assert!(!fake.has_mutations());
}

/// Tests that a rejected bot token surfaces as an authentication error.
///
/// Expected: Err(AuthErr(InvalidToken))
#[tokio::test]
async fn unauthorized_snapshot_is_invalid_token() {
    let fake = fake_with_guilds();
    fake.fail(FakeOp::GetChannels, None, 401);

    let result = service(&fake)
        .clone(&clone_params(false, None), &context())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken { .. }))
    ));
}

/// Tests that an empty source guild is a valid snapshot, not a failure.
///
/// Expected: Ok with no errors and only the metadata patch issued
#[tokio::test]
async fn empty_source_is_not_an_error() {
    let fake = fake_with_guilds();

    let report = service(&fake)
        .clone(&clone_params(false, None), &context())
        .await
        .unwrap();

    assert!(report.errors().is_empty());
    assert!(channel_creates(&fake).is_empty());
    assert_eq!(fake.count(|call| matches!(call, FakeCall::EditGuild { .. })), 1);
}

/// Tests that a failed metadata patch is recorded without aborting.
///
/// Expected: Ok with exactly one error naming the guild details
#[tokio::test]
async fn metadata_failure_is_recorded() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    fake.fail(FakeOp::EditGuild, None, 400);

    let report = service(&fake)
        .clone(&clone_params(false, None), &context())
        .await
        .unwrap();

    assert_eq!(report.errors().len(), 1);
    assert!(report.errors()[0].contains("guild details"));
}

/// Tests that a cancelled run stops at the next stage barrier.
///
/// Expected: Err(CloneAborted(Cancelled)) before any create is issued
#[tokio::test]
async fn cancelled_run_stops_at_barrier() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    let ctx = context();
    ctx.cancel_token().cancel();

    let result = service(&fake).clone(&clone_params(false, None), &ctx).await;

    match result {
        Err(AppError::CloneAborted { error, report }) => {
            assert!(matches!(error, CloneError::Cancelled));
            assert!(report.render_output().contains("Fetched 4 channels and 2 roles"));
        }
        _ => panic!("expected a cancelled run"),
    }
    assert!(!fake.has_mutations());
}

/// Tests that a run past its deadline is aborted with the partial report.
///
/// Expected: Err(CloneAborted(DeadlineExceeded)) and categories kept in the report
#[tokio::test(start_paused = true)]
async fn deadline_aborts_with_partial_report() {
    let fake = fake_with_guilds();
    seed_scenario_source(&fake);
    fake.set_latency(Duration::from_secs(2));
    let ctx = CloneContext::new(CancellationToken::new(), Instant::now() + Duration::from_secs(5));

    let result = service(&fake).clone(&clone_params(false, None), &ctx).await;

    match result {
        Err(AppError::CloneAborted { error, report }) => {
            assert!(matches!(error, CloneError::DeadlineExceeded));
            assert!(report
                .render_output()
                .contains("Created category"));
        }
        _ => panic!("expected the deadline to abort the run"),
    }
    assert_eq!(fake.count(|call| matches!(call, FakeCall::EditGuild { .. })), 0);
}
