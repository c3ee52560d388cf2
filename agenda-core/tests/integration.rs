use std::sync::Arc;

use agenda_core::{
    Agenda, AgendaError, AppointmentRequest, MemoryStore, Occurrence, OccurrenceId, RecurrenceKind,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn utc(m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, m, d, h, 0, 0).unwrap()
}

fn setup() -> (Agenda, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Agenda::new(store.clone()), store)
}

fn request(
    title: &str,
    start: DateTime<Utc>,
    recurrence: &str,
    until: Option<DateTime<Utc>>,
) -> AppointmentRequest {
    AppointmentRequest {
        title: title.to_string(),
        start,
        end: start + Duration::hours(1),
        color: None,
        recurrence: Some(recurrence.to_string()),
        recurrence_until: until,
    }
}

/// Weekly standup Jan 5, 12, 19 and 26.
async fn weekly_series(agenda: &Agenda) -> Vec<Occurrence> {
    let until = utc(1, 26, 9);
    agenda
        .create(&request("Standup", utc(1, 5, 9), "weekly", Some(until)))
        .await
        .unwrap()
}

fn days(occurrences: &[Occurrence]) -> Vec<u32> {
    use chrono::Datelike;
    occurrences.iter().map(|o| o.start.day()).collect()
}

#[tokio::test]
async fn test_create_weekly_series() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;

    assert_eq!(days(&created), vec![5, 12, 19, 26]);
    let series_id = created[0].series_id.clone().unwrap();
    assert!(created.iter().all(|o| o.series_id.as_ref() == Some(&series_id)));
    assert!(created.iter().all(|o| o.recurrence == RecurrenceKind::Weekly));
    assert_eq!(store.all().await, created);
}

#[tokio::test]
async fn test_create_single() {
    let (agenda, _) = setup();
    let created = agenda
        .create(&request("Dentist", utc(1, 5, 9), "none", None))
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].series_id, None);
    assert_eq!(created[0].recurrence_until, None);
    assert_eq!(created[0].color, "#3b82f6");
}

#[tokio::test]
async fn test_create_validation_persists_nothing() {
    let (agenda, store) = setup();
    let mut bad = request("Standup", utc(1, 5, 9), "weekly", Some(utc(1, 4, 0)));
    assert!(matches!(agenda.create(&bad).await, Err(AgendaError::Validation(_))));

    bad.recurrence = Some("hourly".to_string());
    bad.recurrence_until = Some(utc(2, 1, 0));
    assert!(matches!(agenda.create(&bad).await, Err(AgendaError::Validation(_))));
    assert!(store.all().await.is_empty());
}

#[tokio::test]
async fn test_edit_to_single_detaches_and_drops_later() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;
    let series_id = created[0].series_id.clone();
    let third = &created[2];

    let mut edit = request("Standup", third.start, "none", None);
    edit.end = third.end;
    let updated = agenda.update(&third.id, &edit).await.unwrap();
    assert_eq!(updated.id, third.id);
    assert_eq!(updated.series_id, None);
    assert_eq!(updated.recurrence, RecurrenceKind::None);

    let remaining = store.all().await;
    assert_eq!(days(&remaining), vec![5, 12, 19]);
    assert_eq!(remaining[0], created[0]);
    assert_eq!(remaining[1], created[1]);
    assert_eq!(remaining[0].series_id, series_id);
    assert_eq!(remaining[2].series_id, None);
}

#[tokio::test]
async fn test_edit_recurring_splits_series() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;
    let series_id = created[0].series_id.clone();
    let second = &created[1];

    // move from Jan 12 09:00 to Jan 13 14:00, daily until Jan 15 23:00
    let mut edit = request("Retro", utc(1, 13, 14), "Daily", Some(utc(1, 15, 23)));
    edit.color = Some("#ef4444".to_string());
    let updated = agenda.update(&second.id, &edit).await.unwrap();
    assert_eq!(updated.id, second.id);
    assert_eq!(updated.series_id, series_id);

    let all = store.all().await;
    let starts: Vec<_> = all.iter().map(|o| o.start).collect();
    assert_eq!(
        starts,
        vec![utc(1, 5, 9), utc(1, 13, 14), utc(1, 14, 14), utc(1, 15, 14)]
    );

    // past occurrence keeps its stale title, color and rule
    assert_eq!(all[0], created[0]);
    assert_eq!(all[0].title, "Standup");
    assert_eq!(all[0].recurrence, RecurrenceKind::Weekly);

    for o in &all[1..] {
        assert_eq!(o.title, "Retro");
        assert_eq!(o.color, "#ef4444");
        assert_eq!(o.recurrence, RecurrenceKind::Daily);
        assert_eq!(o.recurrence_until, Some(utc(1, 15, 23)));
        assert_eq!(o.series_id, series_id);
    }
}

#[tokio::test]
async fn test_edit_moved_earlier_prunes_from_new_start() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;
    let series_id = created[0].series_id.clone();
    let third = &created[2];

    // move Jan 19 back to Jan 10, still weekly
    let edit = request("Standup", utc(1, 10, 9), "weekly", Some(utc(1, 31, 9)));
    let updated = agenda.update(&third.id, &edit).await.unwrap();
    assert_eq!(updated.id, third.id);
    assert_eq!(updated.start, utc(1, 10, 9));

    let all = store.all().await;
    assert_eq!(days(&all), vec![5, 10, 17, 24, 31]);
    assert_eq!(all[0], created[0]);
    assert!(all.iter().all(|o| o.id != created[1].id));
    assert!(all.iter().all(|o| o.series_id == series_id));
}

#[tokio::test]
async fn test_edit_standalone_to_recurring_starts_new_series() {
    let (agenda, store) = setup();
    let single = agenda
        .create(&request("Gym", utc(1, 5, 18), "none", None))
        .await
        .unwrap()
        .remove(0);

    let edit = request("Gym", utc(1, 5, 18), "monthly", Some(utc(3, 31, 0)));
    let updated = agenda.update(&single.id, &edit).await.unwrap();
    let series_id = updated.series_id.clone().unwrap();

    let all = store.all().await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, single.id);
    assert!(all.iter().all(|o| o.series_id.as_ref() == Some(&series_id)));
}

#[tokio::test]
async fn test_edit_leaves_other_series_alone() {
    let (agenda, store) = setup();
    let first = weekly_series(&agenda).await;
    let other = weekly_series(&agenda).await;

    let edit = request("Standup", first[0].start, "none", None);
    agenda.update(&first[0].id, &edit).await.unwrap();

    let all = store.all().await;
    assert_eq!(all.len(), 5);
    for o in &other {
        assert!(all.contains(o));
    }
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (agenda, _) = setup();
    let edit = request("Standup", utc(1, 5, 9), "none", None);
    assert!(matches!(
        agenda.update(&OccurrenceId::from("missing"), &edit).await,
        Err(AgendaError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_following() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;

    let removed = agenda.delete(&created[1].id, Some("following")).await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(store.all().await, vec![created[0].clone()]);
}

#[tokio::test]
async fn test_delete_all_and_single() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;
    let other = weekly_series(&agenda).await;

    assert_eq!(agenda.delete(&other[3].id, Some("single")).await.unwrap(), 1);
    assert_eq!(agenda.delete(&created[2].id, Some(" ALL ")).await.unwrap(), 4);
    assert_eq!(store.all().await, other[..3].to_vec());

    assert!(matches!(
        agenda.delete(&created[2].id, None).await,
        Err(AgendaError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_scope_on_standalone_is_single() {
    let (agenda, store) = setup();
    weekly_series(&agenda).await;
    let single = agenda
        .create(&request("Dentist", utc(1, 5, 9), "none", None))
        .await
        .unwrap()
        .remove(0);

    assert_eq!(agenda.delete(&single.id, Some("all")).await.unwrap(), 1);
    assert_eq!(store.all().await.len(), 4);
}

#[tokio::test]
async fn test_delete_unknown_scope_rejected_first() {
    let (agenda, store) = setup();
    let created = weekly_series(&agenda).await;
    assert!(matches!(
        agenda.delete(&created[0].id, Some("future")).await,
        Err(AgendaError::Validation(_))
    ));
    assert!(matches!(
        agenda.delete(&OccurrenceId::from("missing"), Some("bogus")).await,
        Err(AgendaError::Validation(_))
    ));
    assert_eq!(store.all().await.len(), 4);
}

#[tokio::test]
async fn test_list_range() {
    let (agenda, _) = setup();
    weekly_series(&agenda).await;

    let listed = agenda.list_between(utc(1, 12, 10), utc(1, 26, 9)).await.unwrap();
    assert_eq!(days(&listed), vec![19]);

    let listed = agenda.list_between(utc(1, 1, 0), utc(2, 1, 0)).await.unwrap();
    assert_eq!(days(&listed), vec![5, 12, 19, 26]);

    assert!(matches!(
        agenda.list_between(utc(1, 12, 0), utc(1, 12, 0)).await,
        Err(AgendaError::Validation(_))
    ));
}
