use chrono::{Duration, Utc};

use lobby::models::{NewThread, ThreadFilter, User};
use lobby::store::{Applied, Command, DiscussionStore, StoreError};
use lobby::validate::{Field, Problem};

/// Helper that returns a fresh, empty store for every test run.
fn store() -> DiscussionStore {
    DiscussionStore::new()
}

fn user(n: u32) -> User {
    User {
        id: format!("anon_test_{n}"),
        display_name: format!("Anonymous{n}"),
        color: "#54A0FF".into(),
        joined_at: Utc::now(),
    }
}

#[test]
fn cs2_predictions_scenario() {
    let mut s = store();
    let me = user(1);

    let id = s
        .create_thread(
            NewThread::new("CS2 Major Predictions", "Esports", "Who wins it all this year?"),
            &me,
        )
        .unwrap();
    assert_eq!(s.thread_count(), 1);
    assert_eq!(s.get_messages(&id).unwrap().len(), 1);

    s.post_message(&id, &me, "Team A for sure").unwrap();
    let thread = s.get_thread(&id).unwrap();
    assert_eq!(thread.message_count, 2);

    let msgs = s.get_messages(&id).unwrap();
    let contents: Vec<_> = msgs.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["Who wins it all this year?", "Team A for sure"]);
    assert!(msgs.iter().all(|m| m.thread_id == id && m.author_id == me.id));
    assert_eq!(msgs[1].author_display_name, "Anonymous1");
    assert_eq!(msgs[1].author_color, "#54A0FF");
}

#[test]
fn created_thread_is_listed_with_one_message() {
    let mut s = store();
    let id = s
        .create_thread(
            NewThread::new("Best indie of 2024", "Indie Games", "Balatro, no contest honestly"),
            &user(2),
        )
        .unwrap();

    let listed = s.list_threads(&ThreadFilter::all());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].message_count, 1);
    assert!(listed[0].is_active);
    assert!(listed[0].last_activity_at >= listed[0].created_at);
}

#[test]
fn post_increments_count_by_one() {
    let mut s = store();
    let id = s
        .create_thread(
            NewThread::new("Retro handhelds", "Retro Gaming", "Anbernic or Miyoo these days?"),
            &user(3),
        )
        .unwrap();

    for expected in 2..=6u64 {
        let before = s.get_thread(&id).unwrap();
        s.post_message(&id, &user(4), "miyoo mini plus").unwrap();
        let after = s.get_thread(&id).unwrap();
        assert_eq!(after.message_count, expected);
        assert!(after.last_activity_at >= before.last_activity_at);
    }
    assert_eq!(s.get_messages(&id).unwrap().len(), 6);
}

#[test]
fn post_to_unknown_thread_changes_nothing() {
    let mut s = store();
    s.create_thread(
        NewThread::new("Streamer drama", "Streamers", "Did anyone catch the stream?"),
        &user(5),
    )
    .unwrap();
    let before = s.snapshot();

    let err = s.post_message("thread_missing", &user(5), "hello?").unwrap_err();
    assert_eq!(err, StoreError::NotFound("thread_missing".into()));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn title_length_boundary() {
    let mut s = store();
    let err = s
        .create_thread(NewThread::new("abcd", "Esports", "ten chars and more"), &user(6))
        .unwrap_err();
    match err {
        StoreError::Validation(v) => {
            assert_eq!(v.problem(Field::Title), Some(Problem::TooShort { min: 5 }))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(s.thread_count(), 0);

    s.create_thread(NewThread::new("abcde", "Esports", "ten chars and more"), &user(6))
        .unwrap();
    assert_eq!(s.thread_count(), 1);
}

#[test]
fn invalid_chat_message_is_rejected() {
    let mut s = store();
    let id = s
        .create_thread(
            NewThread::new("Mobile gacha talk", "Mobile Games", "Which gacha is least predatory?"),
            &user(7),
        )
        .unwrap();

    let too_long = "z".repeat(501);
    for bad in ["", "    ", too_long.as_str()] {
        let err = s.post_message(&id, &user(7), bad).unwrap_err();
        assert!(
            matches!(err, StoreError::Validation(ref v) if v.has(Field::Content)),
            "{bad:?}: {err:?}"
        );
    }
    assert_eq!(s.get_thread(&id).unwrap().message_count, 1);
}

#[test]
fn category_filter_is_case_insensitive_and_sorted_by_activity() {
    let mut s = store();
    let t0 = Utc::now() - Duration::minutes(10);
    let author = user(8);

    let mk = |title: &str, category: &str, minutes: i64| {
        Command::create_thread(
            NewThread::new(title, category, "opening message text"),
            author.clone(),
            t0 + Duration::minutes(minutes),
        )
    };
    let ids: Vec<_> = [
        mk("Major quarterfinals", "Esports", 0),
        mk("Hollow Knight speedruns", "Indie Games", 1),
        mk("LAN setups thread", "esports", 2),
        mk("Caster hot takes", "ESPORTS", 3),
    ]
    .into_iter()
    .map(|cmd| match s.dispatch(cmd).unwrap() {
        Applied::ThreadCreated(id) => id,
        other => panic!("unexpected {other:?}"),
    })
    .collect();

    // oldest esports thread becomes the most recently active
    let bump_at = t0 + Duration::minutes(5);
    let bump = Command::post_message(ids[0].clone(), author.clone(), "bump", bump_at);
    s.dispatch(bump).unwrap();

    let listed: Vec<_> = s
        .list_threads(&ThreadFilter::category("Esports"))
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, [ids[0].clone(), ids[3].clone(), ids[2].clone()]);

    let all = s.list_threads(&ThreadFilter::category("all"));
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].last_activity_at >= w[1].last_activity_at));

    assert!(s.list_threads(&ThreadFilter::category("Streamers")).is_empty());
}

#[test]
fn selection_join_and_leave() {
    let mut s = store();
    assert!(s.current_thread().is_none());

    let id = s
        .create_thread(
            NewThread::new("Gaming tech corner", "Gaming Tech", "Is a 4090 overkill for 1440p?"),
            &user(9),
        )
        .unwrap();

    s.join_thread(&id).unwrap();
    assert_eq!(s.current_thread().map(|t| t.id.clone()), Some(id.clone()));

    let err = s.select_thread(Some("nope")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(s.current_thread().map(|t| t.id.clone()), Some(id));

    s.leave_thread();
    assert!(s.current_thread().is_none());
}

#[test]
fn get_messages_of_unknown_thread_is_not_found() {
    let s = store();
    assert!(matches!(s.get_messages("ghost"), Err(StoreError::NotFound(_))));
    assert!(matches!(s.get_thread("ghost"), Err(StoreError::NotFound(_))));
}

#[test]
fn demo_seed_respects_invariants() {
    let mut s = store();
    let ids = lobby::seed::seed_demo(&mut s).unwrap();
    assert_eq!(ids.len(), 2);

    for id in &ids {
        let thread = s.get_thread(id).unwrap();
        assert_eq!(thread.message_count as usize, s.get_messages(id).unwrap().len());
        assert!(thread.description.is_some());
    }
    let listed = s.list_threads(&ThreadFilter::all());
    assert_eq!(listed[0].title, "New Elden Ring DLC Discussion");
    assert_eq!(listed[0].message_count, 2);
}

#[test]
fn reused_thread_id_is_rejected_and_state_kept() {
    let mut s = store();
    let at = Utc::now();
    let create = |title: &str, message_id: &str| Command::CreateThread {
        thread_id: "thread_x".into(),
        message_id: message_id.into(),
        new: NewThread::new(title, "Esports", "opening message text"),
        author: user(10),
        at,
    };

    assert_eq!(
        s.dispatch(create("First thread", "msg_a")).unwrap(),
        Applied::ThreadCreated("thread_x".into())
    );
    let before = s.snapshot();

    let err = s.dispatch(create("Second thread", "msg_b")).unwrap_err();
    assert_eq!(err, StoreError::Conflict("thread_x".into()));
    assert_eq!(s.snapshot(), before);

    let listed = s.list_threads(&ThreadFilter::all());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "First thread");
    assert_eq!(listed[0].message_count, 1);
    assert_eq!(s.get_messages("thread_x").unwrap().len(), 1);
}

#[test]
fn reused_message_id_across_threads_is_rejected() {
    let mut s = store();
    let at = Utc::now();
    s.dispatch(Command::CreateThread {
        thread_id: "thread_a".into(),
        message_id: "msg_1".into(),
        new: NewThread::new("Thread one", "Esports", "opening message text"),
        author: user(11),
        at,
    })
    .unwrap();
    s.dispatch(Command::CreateThread {
        thread_id: "thread_b".into(),
        message_id: "msg_2".into(),
        new: NewThread::new("Thread two", "Esports", "opening message text"),
        author: user(11),
        at,
    })
    .unwrap();
    let before = s.snapshot();

    let err = s
        .dispatch(Command::PostMessage {
            message_id: "msg_1".into(),
            thread_id: "thread_b".into(),
            author: user(11),
            content: "dup".into(),
            at,
        })
        .unwrap_err();
    assert_eq!(err, StoreError::Conflict("msg_1".into()));
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.get_thread("thread_b").unwrap().message_count, 1);
}

#[test]
fn category_slug_and_name_are_interchangeable() {
    let mut s = store();
    let id = s
        .create_thread(
            NewThread::new("Best CRT for SNES", "retro", "Trinitron or bust, right?"),
            &user(12),
        )
        .unwrap();
    assert_eq!(s.get_thread(&id).unwrap().category, "Retro Gaming");

    s.create_thread(
        NewThread::new("Pixel art appreciation", "Retro Gaming", "Post your favorite sprites"),
        &user(12),
    )
    .unwrap();
    s.create_thread(
        NewThread::new("Elden Ring builds", "Action RPG", "Bleed is still the meta"),
        &user(12),
    )
    .unwrap();

    assert_eq!(s.list_threads(&ThreadFilter::category("retro")).len(), 2);
    assert_eq!(s.list_threads(&ThreadFilter::category("RETRO GAMING")).len(), 2);
    // categories outside the catalog still filter by name
    assert_eq!(s.list_threads(&ThreadFilter::category("action rpg")).len(), 1);
}

#[test]
fn category_summaries_count_threads_and_messages() {
    let mut s = store();
    let a = s
        .create_thread(
            NewThread::new("Worlds pick'em", "esports", "Who makes it out of groups?"),
            &user(13),
        )
        .unwrap();
    s.post_message(&a, &user(14), "T1 again").unwrap();
    s.create_thread(
        NewThread::new("Valorant Champions", "Esports", "Sentinels or Fnatic this year?"),
        &user(13),
    )
    .unwrap();

    let esports = s.category_summary("esports").unwrap();
    assert_eq!(esports.category.name, "Esports");
    assert_eq!(esports.thread_count, 2);
    assert_eq!(esports.message_count, 3);

    let tech = s.category_summary("Gaming Tech").unwrap();
    assert_eq!((tech.thread_count, tech.message_count), (0, 0));

    assert!(s.category_summary("Action RPG").is_none());

    let all = s.category_summaries();
    assert_eq!(all.len(), 8);
    assert_eq!(all[0].category.slug, "popular");
    assert_eq!(all.iter().map(|c| c.thread_count).sum::<usize>(), 2);
}

#[test]
fn leaving_without_a_selection_is_harmless() {
    let mut s = store();
    s.leave_thread();
    assert!(s.current_thread().is_none());
}
