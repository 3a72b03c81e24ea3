use artistdb_core::{authenticate, AuthError, InMemoryClient, SecretPrompt};

struct ScriptedPrompt {
    secrets: Vec<String>,
    reads: u32,
}

impl ScriptedPrompt {
    fn new(secrets: &[&str]) -> Self {
        Self {
            secrets: secrets.iter().rev().map(|s| s.to_string()).collect(),
            reads: 0,
        }
    }
}

impl SecretPrompt for ScriptedPrompt {
    fn read_secret(&mut self) -> std::io::Result<String> {
        self.reads += 1;
        Ok(self.secrets.pop().unwrap_or_default())
    }
}

#[test]
fn attempts_are_bounded_at_exactly_max_attempts() {
    let mut client = InMemoryClient::with_credentials("user", "secret");
    let mut prompt = ScriptedPrompt::new(&["wrong1", "wrong2", "wrong3", "never-read"]);

    let err = authenticate(&mut client, "user", None, &mut prompt, 3).unwrap_err();

    assert!(matches!(err, AuthError::TooManyAttempts { attempts: 3 }));
    assert_eq!(client.auth_calls(), 3);
    assert_eq!(prompt.reads, 3);
    assert!(!client.is_authenticated());
}

#[test]
fn succeeds_midway_and_stops_prompting() {
    let mut client = InMemoryClient::with_credentials("user", "secret");
    let mut prompt = ScriptedPrompt::new(&["wrong", "secret", "never-read"]);

    authenticate(&mut client, "user", None, &mut prompt, 5).unwrap();

    assert_eq!(client.auth_calls(), 2);
    assert_eq!(prompt.reads, 2);
    assert!(client.is_authenticated());
}

#[test]
fn prompt_failure_aborts_without_consuming_attempts() {
    struct FailingPrompt;
    impl SecretPrompt for FailingPrompt {
        fn read_secret(&mut self) -> std::io::Result<String> {
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ))
        }
    }

    let mut client = InMemoryClient::with_credentials("user", "secret");
    let err = authenticate(&mut client, "user", None, &mut FailingPrompt, 5).unwrap_err();
    assert!(matches!(err, AuthError::Prompt(_)));
    assert_eq!(client.auth_calls(), 0);
}
