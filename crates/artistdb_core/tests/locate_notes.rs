use artistdb_core::{
    locate, ApiStatus, Category, ClientError, InMemoryClient, LocateError, LocateOutcome, Note,
    NoteClient, NoteSummary, SyncConfig,
};
use std::cell::Cell;

/// Client serving notes in a caller-chosen listing order.
struct OrderedClient {
    notes: Vec<Note>,
    gets: Cell<u32>,
}

impl OrderedClient {
    fn new(contents: &[&str]) -> Self {
        let notes = contents
            .iter()
            .enumerate()
            .map(|(index, content)| {
                let mut note = Note::new(*content, vec!["danbooru".to_string()]);
                note.key = Some(format!("key-{index}"));
                note
            })
            .collect();
        Self {
            notes,
            gets: Cell::new(0),
        }
    }
}

impl NoteClient for OrderedClient {
    fn authenticate(&mut self, _username: &str, _password: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn list_notes(&self, tag: &str) -> Result<(Vec<NoteSummary>, ApiStatus), ClientError> {
        let summaries = self
            .notes
            .iter()
            .filter(|note| note.tags.iter().any(|t| t == tag))
            .map(|note| NoteSummary {
                key: note.key.clone().unwrap_or_default(),
                tags: note.tags.clone(),
            })
            .collect();
        Ok((summaries, ApiStatus::Ok))
    }

    fn get_note(&self, key: &str) -> Result<(Note, ApiStatus), ClientError> {
        self.gets.set(self.gets.get() + 1);
        let note = self
            .notes
            .iter()
            .find(|note| note.key.as_deref() == Some(key))
            .cloned()
            .ok_or_else(|| ClientError::Transport(format!("unknown note key `{key}`")))?;
        Ok((note, ApiStatus::Ok))
    }

    fn add_note(&self, _note: &Note) -> Result<(Note, ApiStatus), ClientError> {
        Err(ClientError::Transport(
            "unexpected add_note in ordered client".to_string(),
        ))
    }

    fn update_note(&self, _note: &Note) -> Result<(Note, ApiStatus), ClientError> {
        Err(ClientError::Transport(
            "unexpected update_note in ordered client".to_string(),
        ))
    }
}

fn located_pair(client: &OrderedClient) -> (String, String) {
    match locate(client, &SyncConfig::default()).unwrap() {
        LocateOutcome::Found(pair) => (pair.artists.content, pair.vips.content),
        LocateOutcome::Provisioned(_) => panic!("expected both notes to be found"),
    }
}

#[test]
fn classification_is_order_independent() {
    let contents = [
        "# Danbooru Artists\nArtistA",
        "# Danbooru VIPs\nVipA",
        "# Unrelated note\nbody",
    ];

    let baseline = located_pair(&OrderedClient::new(&contents));
    for rotation in 1..contents.len() {
        let mut permuted = contents.to_vec();
        permuted.rotate_left(rotation);
        assert_eq!(located_pair(&OrderedClient::new(&permuted)), baseline);
    }
}

#[test]
fn locate_stops_fetching_once_both_categories_found() {
    let client = OrderedClient::new(&[
        "# Danbooru Artists",
        "# Danbooru VIPs",
        "# Unrelated one",
        "# Unrelated two",
    ]);

    let outcome = locate(&client, &SyncConfig::default()).unwrap();
    assert!(matches!(outcome, LocateOutcome::Found(_)));
    assert_eq!(client.gets.get(), 2);
}

#[test]
fn both_notes_absent_provisions_exactly_two_and_signals_retry() {
    let config = SyncConfig::default();
    let client = InMemoryClient::new();
    for index in 0..3 {
        client.seed_note(Note::new(
            format!("# Unrelated {index}\nbody"),
            vec![config.tag.clone()],
        ));
    }

    let outcome = locate(&client, &config).unwrap();
    assert_eq!(
        outcome,
        LocateOutcome::Provisioned(vec![Category::Artists, Category::Vips])
    );
    assert_eq!(client.add_calls(), 2);

    let managed: Vec<Note> = client
        .notes_with_tag(&config.tag)
        .into_iter()
        .filter(|note| config.classify_title(note.title()).is_some())
        .collect();
    assert_eq!(managed.len(), 2);
    for note in &managed {
        assert_eq!(note.content, note.title());
        assert_eq!(note.tags, vec![config.tag.clone()]);
    }

    // The signaled retry now finds the provisioned pair.
    let retried = locate(&client, &config).unwrap();
    assert!(matches!(retried, LocateOutcome::Found(_)));
}

#[test]
fn single_missing_category_provisions_only_that_category() {
    let config = SyncConfig::default();
    let client = InMemoryClient::new();
    client.seed_note(Note::new(
        config.title(Category::Artists),
        vec![config.tag.clone()],
    ));

    let outcome = locate(&client, &config).unwrap();
    assert_eq!(outcome, LocateOutcome::Provisioned(vec![Category::Vips]));
    assert_eq!(client.add_calls(), 1);
}

#[test]
fn failed_fetch_status_is_remote_access_error() {
    let config = SyncConfig::default();
    let client = InMemoryClient::new();
    client.seed_note(Note::new("# Something\nbody", vec![config.tag.clone()]));
    client.set_get_status_failure(true);

    let err = locate(&client, &config).unwrap_err();
    assert!(matches!(err, LocateError::RemoteAccess));
}

#[test]
fn transient_list_failures_are_retried_then_exhausted() {
    let config = SyncConfig::default();
    let client = InMemoryClient::new();
    for _ in 0..config.list_attempts {
        client.script_list_failure(ClientError::LoginExpired);
    }

    let err = locate(&client, &config).unwrap_err();
    assert!(matches!(err, LocateError::RetryExhausted { attempts: 5 }));
}
