mod common;

use std::sync::Arc;

use common::{draft, TestServer};
use referrals::client::{ClientError, ReferralApi};
use referrals::domain::{ListFilter, Pagination, ReferralChanges, ReferralStatus};
use referrals::store::{
    CreateReferral, DeleteReferral, Notification, RecordingNotifier, ReferralContext,
    ReferralList, UpdateReferral,
};

#[tokio::test]
async fn duplicate_email_surfaces_through_create_hook() {
    let server = TestServer::start().await;
    let (ctx, notifier) = server.context();
    let create = CreateReferral::new(&ctx);

    create
        .mutate(draft("John", "Smith", "john@example.com"))
        .await
        .unwrap();
    let err = create
        .mutate(draft("Johnny", "Smith", "john@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Conflict { .. }));
    assert_eq!(err.server_message(), Some("Email already exists"));
    assert!(create.is_error());
    assert_eq!(create.error().as_deref(), Some("Email already exists"));
    assert_eq!(
        ctx.store.snapshot().error.as_deref(),
        Some("Email already exists")
    );
    assert_eq!(
        notifier.notifications(),
        vec![
            Notification::Success("Referral for John Smith created successfully!".into()),
            Notification::Error("Email already exists".into()),
        ]
    );

    server.stop().await;
}

#[tokio::test]
async fn invalid_email_is_a_validation_error() {
    let server = TestServer::start().await;
    let (ctx, _) = server.context();
    let create = CreateReferral::new(&ctx);

    let err = create
        .mutate(draft("Bad", "Email", "not-an-email"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(create.error().as_deref(), Some("Invalid email format"));

    server.stop().await;
}

#[tokio::test]
async fn list_round_trip_with_window() {
    let server = TestServer::start().await;
    let (ctx, _) = server.context();
    let create = CreateReferral::new(&ctx);
    for i in 0..5 {
        create
            .mutate(draft("User", &i.to_string(), &format!("user{i}@example.com")))
            .await
            .unwrap();
    }

    let list = ReferralList::new(&ctx, ListFilter::page(2, 4));
    list.activate().await;

    assert_eq!(list.referrals().len(), 1);
    assert_eq!(list.referrals()[0].email, "user0@example.com");
    assert_eq!(list.pagination(), Pagination::new(5, 2, 4));
    assert!(!list.pagination().has_more);
    assert!(!list.is_loading());
    assert!(!list.is_error());

    list.refetch(ListFilter::page(2, 0)).await;
    let emails: Vec<_> = list.referrals().into_iter().map(|r| r.email).collect();
    assert_eq!(emails, vec!["user4@example.com", "user3@example.com"]);
    assert!(list.pagination().has_more);

    server.stop().await;
}

#[tokio::test]
async fn status_filter_reaches_server() {
    let server = TestServer::start().await;
    let (ctx, _) = server.context();
    let created = CreateReferral::new(&ctx)
        .mutate(draft("Maria", "Garcia", "maria@example.com"))
        .await
        .unwrap();
    CreateReferral::new(&ctx)
        .mutate(draft("David", "Chen", "david@example.com"))
        .await
        .unwrap();
    UpdateReferral::new(&ctx)
        .mutate(
            created.id,
            ReferralChanges {
                status: Some("contacted".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let list = ReferralList::new(
        &ctx,
        ListFilter::default().with_status(ReferralStatus::Contacted),
    );
    list.activate().await;

    let referrals = list.referrals();
    assert_eq!(referrals.len(), 1);
    assert_eq!(referrals[0].id, created.id);
    assert_eq!(referrals[0].status, ReferralStatus::Contacted);

    server.stop().await;
}

#[tokio::test]
async fn mutations_update_cached_list_without_refetch() {
    let server = TestServer::start().await;
    let (ctx, notifier) = server.context();
    let create = CreateReferral::new(&ctx);
    let first = create
        .mutate(draft("Emma", "Wilson", "emma@example.com"))
        .await
        .unwrap();

    let list = ReferralList::new(&ctx, ListFilter::default());
    list.activate().await;
    assert_eq!(list.pagination().total, 1);

    let second = create
        .mutate(draft("Robert", "Taylor", "rob@example.com"))
        .await
        .unwrap();
    assert_eq!(list.referrals()[0], second);
    assert_eq!(list.pagination().total, 2);

    let updated = UpdateReferral::new(&ctx)
        .mutate(
            first.id,
            ReferralChanges {
                notes: Some(Some("Call back Friday".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(list.referrals()[1], updated);

    DeleteReferral::new(&ctx).mutate(second.id).await.unwrap();
    assert_eq!(list.referrals(), vec![updated]);
    assert_eq!(list.pagination().total, 1);

    assert_eq!(
        notifier.take().last(),
        Some(&Notification::Success("Referral deleted successfully!".into()))
    );

    server.stop().await;
}

#[tokio::test]
async fn refetch_failure_is_logged_not_raised() {
    let server = TestServer::start().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = ReferralContext::new(Arc::new(server.api("wrong-token")), notifier.clone());

    let list = ReferralList::new(&ctx, ListFilter::default());
    list.activate().await;

    assert!(list.is_error());
    assert!(!list.is_loading());
    assert_eq!(list.error().as_deref(), Some("Invalid token"));
    assert_eq!(
        notifier.notifications(),
        vec![Notification::Error("Invalid token".into())]
    );

    server.stop().await;
}

#[tokio::test]
async fn delete_missing_referral_fails_with_not_found() {
    let server = TestServer::start().await;
    let (ctx, _) = server.context();
    let delete = DeleteReferral::new(&ctx);

    let err = delete.mutate(4242).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { .. }));
    assert_eq!(delete.error().as_deref(), Some("Referral not found"));

    server.stop().await;
}

#[tokio::test]
async fn client_get_round_trip() {
    let server = TestServer::start().await;
    let api = server.api(common::TOKEN);
    let created = api
        .create(&draft("David", "Chen", "david.chen@example.com"))
        .await
        .unwrap();

    let fetched = api.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.country, "Australia");
    assert_eq!(fetched.status, ReferralStatus::Pending);

    server.stop().await;
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let server = TestServer::start().await;
    let api = server.api(common::TOKEN);
    server.stop().await;

    let err = api.list(&ListFilter::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.server_message(), None);
}
