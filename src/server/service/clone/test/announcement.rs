use super::*;

use crate::server::service::clone::announcement::announce;

/// Tests that the announcement lands in a new marker channel of the target guild.
///
/// Expected: marker channel named `clone-report` at position 0, message sent into it
#[tokio::test]
async fn posts_into_marker_channel() {
    let fake = fake_with_guilds();
    fake.add_channel(SOURCE_GUILD, channel(10, SOURCE_GUILD, "general", TEXT, None));
    let service = service(&fake);

    let report = service
        .clone(&clone_params(false, None), &context())
        .await
        .unwrap();

    service
        .spawn_announcement(SOURCE_GUILD, TARGET_GUILD, &report)
        .await
        .unwrap();

    let marker = fake
        .calls()
        .into_iter()
        .find_map(|call| match call {
            FakeCall::CreateChannel {
                guild_id,
                payload,
                created_id,
            } if payload.name == "clone-report" => Some((guild_id, payload, created_id)),
            _ => None,
        })
        .unwrap();

    assert_eq!(marker.0, TARGET_GUILD);
    assert_eq!(marker.1.position, 0);
    assert_eq!(marker.1.resolved_parent(), None);

    let sent_to: Vec<u64> = fake
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            FakeCall::SendMessage { channel_id, .. } => Some(channel_id),
            _ => None,
        })
        .collect();
    assert_eq!(sent_to, vec![marker.2.unwrap()]);
}

/// Tests that a failed marker channel create skips the message.
///
/// Expected: Err from `announce` and no message sent
#[tokio::test]
async fn failed_marker_skips_message() {
    let fake = fake_with_guilds();
    fake.fail(FakeOp::CreateChannel, Some("clone-report"), 403);
    let announcement = crate::server::model::discord::Announcement::from_report(
        SOURCE_GUILD,
        &Default::default(),
    );

    let result = announce(&fake, TARGET_GUILD, "clone-report", &announcement).await;

    assert!(result.is_err());
    assert_eq!(fake.count(|call| matches!(call, FakeCall::SendMessage { .. })), 0);
}

/// Tests that announcement failures stay inside the detached task.
///
/// Expected: the task completes normally even though sending failed
#[tokio::test]
async fn failure_is_only_logged() {
    let fake = fake_with_guilds();
    fake.fail(FakeOp::SendMessage, None, 500);

    let handle = service(&fake).spawn_announcement(
        SOURCE_GUILD,
        TARGET_GUILD,
        &Default::default(),
    );

    assert!(handle.await.is_ok());
    assert_eq!(fake.count(|call| matches!(call, FakeCall::SendMessage { .. })), 1);
}
