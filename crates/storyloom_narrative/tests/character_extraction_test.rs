//! Tests for principal-subject extraction.

mod test_utils;

use storyloom_core::ExtractionStatus;
use storyloom_error::TextGenerationErrorKind;
use storyloom_narrative::{CharacterExtractor, parse_character_block};
use test_utils::{MockReply, MockTextGenerator};

#[test]
fn test_parse_both_labels() {
    let reply = "Sure! Here it is.\nDescription: A tall knight in silver armor\nTokens: knight, silver armor, tall, plume";

    let character = parse_character_block(reply);

    assert_eq!(character.description(), "A tall knight in silver armor");
    assert_eq!(character.tokens(), &["knight", "silver armor", "tall", "plume"]);
}

#[test]
fn test_parse_missing_labels() {
    let only_description = parse_character_block("Description: A fox");
    assert_eq!(only_description.description(), "A fox");
    assert!(only_description.tokens().is_empty());

    let only_tokens = parse_character_block("Tokens: fox, scarf");
    assert!(only_tokens.description().is_empty());
    assert_eq!(only_tokens.tokens().len(), 2);

    assert!(parse_character_block("I could not find a character.").is_empty());
}

#[test]
fn test_labels_are_case_sensitive() {
    let character = parse_character_block("description: A fox\ntokens: fox");
    assert!(character.is_empty());
}

#[test]
fn test_splits_on_first_colon_only() {
    let character = parse_character_block("Description: Armor: silver, helm: none");
    assert_eq!(character.description(), "Armor: silver, helm: none");
}

#[tokio::test]
async fn test_extract_complete() -> anyhow::Result<()> {
    let mock = MockTextGenerator::new_success("Description: A fox in a red scarf\nTokens: fox, red scarf");
    let extractor = CharacterExtractor::new(mock);

    let extraction = extractor.extract("Scene 1:\nThe fox wakes. [A fox]").await;

    assert!(!extraction.is_degraded());
    assert_eq!(extraction.value().description(), "A fox in a red scarf");
    let character = extraction.into_result()?;
    assert_eq!(character.tokens().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_extract_prompt_carries_story() {
    let mock = std::sync::Arc::new(MockTextGenerator::new_success("Description: x"));
    let extractor = CharacterExtractor::new(mock.clone());

    extractor.extract("THE-WHOLE-STORY").await;

    assert_eq!(mock.call_count(), 1);
    let prompt = &mock.prompts()[0];
    assert!(prompt.contains("THE-WHOLE-STORY"));
    assert!(prompt.contains("Description:"));
    assert!(prompt.contains("Tokens:"));
}

#[tokio::test]
async fn test_extract_failure_degrades_to_empty() {
    let mock = MockTextGenerator::new(vec![MockReply::Error(TextGenerationErrorKind::Transport(
        "connection refused".to_string(),
    ))]);
    let extractor = CharacterExtractor::new(mock);

    let extraction = extractor.extract("story").await;

    assert!(extraction.is_degraded());
    assert!(extraction.value().is_empty());
    match extraction.status() {
        ExtractionStatus::Degraded { reason } => assert!(reason.contains("connection refused")),
        ExtractionStatus::Complete => panic!("expected degraded status"),
    }
    assert!(extraction.into_result().is_err());
}

#[tokio::test]
async fn test_extract_unlabeled_reply_is_complete_but_empty() {
    let mock = MockTextGenerator::new_success("The main character is a fox.");
    let extractor = CharacterExtractor::new(mock);

    let extraction = extractor.extract("story").await;

    assert!(!extraction.is_degraded());
    assert!(extraction.value().is_empty());
}
