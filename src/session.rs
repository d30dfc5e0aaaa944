use dialoguer::Input;

pub(crate) const MAX_ATTEMPTS: usize = 3;
const MIN_USERNAME_LEN: usize = 4;

pub(crate) fn welcome() {
    println!("Welcome to the text analysis tool.");
    println!("I will mine and analyze a body of text in a file you give me.\n");
}

pub(crate) fn greet(name: &str) {
    println!("Hello {name}!\n");
}

/// At least four characters, starting with a letter or `_` and continuing
/// with letters, digits or `_`.
pub(crate) fn is_valid_username(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.chars().count() >= MIN_USERNAME_LEN
        && (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

pub(crate) fn generate_username() -> String {
    username_from_uuid(uuid::Uuid::new_v4())
}

fn username_from_uuid(id: uuid::Uuid) -> String {
    let simple = id.simple().to_string();
    format!("reader_{}", &simple[..8])
}

/// Ask for a username until a valid one is given, assigning a generated name
/// after [`MAX_ATTEMPTS`] rejections.
///
/// # Errors
///
/// Returns an error if reading from the prompt fails.
pub(crate) fn prompt_username() -> anyhow::Result<String> {
    resolve_username(|prompt| {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    })
}

fn resolve_username<F>(mut ask: F) -> anyhow::Result<String>
where
    F: FnMut(&str) -> anyhow::Result<String>,
{
    for attempt in 0..MAX_ATTEMPTS {
        let prompt = if attempt == 0 {
            "To begin, please enter your username"
        } else {
            "Please, try again"
        };
        let name = ask(prompt)?;
        if is_valid_username(&name) {
            return Ok(name);
        }
        println!(
            "Your username must be at least {MIN_USERNAME_LEN} characters long, alphanumeric only,\n\
             have no spaces, and cannot start with a symbol"
        );
    }

    println!("\nExhausted all {MAX_ATTEMPTS} attempts, assigning new username...");
    let name = generate_username();
    tracing::debug!(%name, "assigned generated username");
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("_bob"));
        assert!(is_valid_username("user_42"));
        assert!(is_valid_username("émile"));
    }

    #[test]
    fn invalid_usernames() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("bob"));
        assert!(!is_valid_username("4real"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username("dash-name"));
        assert!(!is_valid_username("$money"));
    }

    #[test]
    fn generated_username_is_valid() {
        let name = generate_username();
        assert!(is_valid_username(&name), "{name}");
    }

    #[test]
    fn generated_username_uses_uuid_prefix() {
        let id = uuid::Uuid::parse_str("3f9a1c2b-0000-4000-8000-000000000000").unwrap();
        assert_eq!(username_from_uuid(id), "reader_3f9a1c2b");
    }

    #[test]
    fn first_valid_answer_wins() {
        let mut prompts = Vec::new();
        let name = resolve_username(|p| {
            prompts.push(p.to_owned());
            Ok("trader_joe".to_owned())
        })
        .unwrap();
        assert_eq!(name, "trader_joe");
        assert_eq!(prompts, ["To begin, please enter your username"]);
    }

    #[test]
    fn retries_until_valid() {
        let mut answers = ["no", "1abc", "valid_name"].into_iter();
        let mut prompts = Vec::new();
        let name = resolve_username(|p| {
            prompts.push(p.to_owned());
            Ok(answers.next().unwrap().to_owned())
        })
        .unwrap();
        assert_eq!(name, "valid_name");
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[1], "Please, try again");
    }

    #[test]
    fn exhausted_attempts_assign_generated_name() {
        let mut calls = 0;
        let name = resolve_username(|_| {
            calls += 1;
            Ok("x".to_owned())
        })
        .unwrap();
        assert_eq!(calls, MAX_ATTEMPTS);
        assert!(name.starts_with("reader_"));
        assert!(is_valid_username(&name));
    }

    #[test]
    fn prompt_error_propagates() {
        let result = resolve_username(|_| anyhow::bail!("stdin closed"));
        assert!(result.is_err());
    }
}
