mod common;

use std::time::Duration;

use common::{Fixture, service_for};
use serde_json::json;
use vibecheck::{
    event::EventHandler,
    id::{Handle, Slot},
    notice_service::{NoticeLevel, NoticeMessage, NoticeService},
    stores::{ComparisonStore, SlotState},
};
use wiremock::MockServer;

struct Session {
    events: EventHandler,
    store: ComparisonStore,
    notices: NoticeService,
}

impl Session {
    fn new() -> Self {
        let events = EventHandler::new();
        let store = ComparisonStore::new(events.sender());
        Self { events, store, notices: NoticeService::new() }
    }

    fn drain(&mut self) {
        while let Some(event) = self.events.try_next() {
            self.store.apply(&event);
            self.notices.apply(&event);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn three_pipelines_fill_their_own_slots() {
    let server = MockServer::start().await;
    Fixture::named("alice").mount(&server).await;
    Fixture::named("bob").mount(&server).await;

    let service = service_for(&server);
    let mut session = Session::new();
    let mut tasks = Vec::new();

    for login in ["alice", "bob", "ghost"] {
        let slot = session.store.next_free_slot().unwrap();
        let handle = Handle::parse(login).unwrap();
        tasks.push(service.spawn_aggregate(slot, handle, session.events.sender()));
        session.drain();
    }

    assert_eq!(session.store.next_free_slot(), None);

    for task in tasks {
        task.await.unwrap();
    }
    session.drain();

    assert!(!session.store.is_loading());
    assert_eq!(session.store.get(Slot::Primary).unwrap().profile.login, "alice");
    assert_eq!(session.store.get(Slot::Comparison1).unwrap().profile.login, "bob");
    assert_eq!(*session.store.state(Slot::Comparison2), SlotState::Empty);

    let error = session.notices.pop_notice().unwrap();
    assert_eq!(error.level, NoticeLevel::Error);
    assert_eq!(
        error.message,
        NoticeMessage::ProfileUnavailable(Slot::Comparison2, Handle::parse("ghost").unwrap())
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn removed_slot_can_be_reused() {
    let server = MockServer::start().await;
    Fixture::named("alice").mount(&server).await;
    Fixture::named("bob").mount(&server).await;
    Fixture::named("carol").mount(&server).await;

    let service = service_for(&server);
    let mut session = Session::new();

    for login in ["alice", "bob"] {
        let slot = session.store.next_free_slot().unwrap();
        service
            .spawn_aggregate(slot, Handle::parse(login).unwrap(), session.events.sender())
            .await
            .unwrap();
        session.drain();
    }
    assert_eq!(session.store.len(), 2);

    let removed = session.store.remove(Slot::Comparison1).unwrap();
    assert_eq!(removed.profile.login, "bob");
    session.drain();
    assert_eq!(session.store.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 10);

    let slot = session.store.next_free_slot().unwrap();
    assert_eq!(slot, Slot::Comparison1);
    service
        .spawn_aggregate(slot, Handle::parse("carol").unwrap(), session.events.sender())
        .await
        .unwrap();
    session.drain();

    let logins: Vec<_> = session
        .store
        .views()
        .map(|(slot, view)| (slot, view.profile.login.to_string()))
        .collect();
    assert_eq!(
        logins,
        [
            (Slot::Primary, "alice".to_string()),
            (Slot::Comparison1, "carol".to_string())
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn renamed_account_fills_the_requested_slot() {
    let server = MockServer::start().await;
    let mut fixture = Fixture::named("old-name");
    fixture.profile["login"] = json!("new-name");
    fixture.mount(&server).await;

    let service = service_for(&server);
    let mut session = Session::new();

    service
        .spawn_aggregate(Slot::Primary, fixture.handle(), session.events.sender())
        .await
        .unwrap();
    session.drain();

    assert!(!session.store.is_loading());
    assert_eq!(session.store.get(Slot::Primary).unwrap().profile.login, "new-name");
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn late_result_for_reassigned_slot_is_dropped() {
    let server = MockServer::start().await;
    Fixture::named("slowpoke")
        .mount_delayed(&server, Duration::from_millis(300))
        .await;
    Fixture::named("alice").mount(&server).await;

    let service = service_for(&server);
    let mut session = Session::new();

    let slow = service.spawn_aggregate(
        Slot::Primary,
        Handle::parse("slowpoke").unwrap(),
        session.events.sender(),
    );
    session.drain();
    assert_eq!(
        *session.store.state(Slot::Primary),
        SlotState::Loading(Handle::parse("slowpoke").unwrap())
    );

    session.store.remove(Slot::Primary);
    session.drain();

    let slot = session.store.next_free_slot().unwrap();
    assert_eq!(slot, Slot::Primary);
    let fast = service.spawn_aggregate(slot, Handle::parse("alice").unwrap(), session.events.sender());

    fast.await.unwrap();
    slow.await.unwrap();
    session.drain();

    assert!(!session.store.is_loading());
    assert_eq!(session.store.get(Slot::Primary).unwrap().profile.login, "alice");
    assert_eq!(session.store.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 10);
}
