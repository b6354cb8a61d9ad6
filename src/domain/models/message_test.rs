use test_utils::long_question_fixture;
use test_utils::markup_reply_fixture;

use super::Message;
use super::MessageType;
use super::Sender;

#[test]
fn it_executes_new() {
    let msg = Message::new(Sender::Bot, "Hi there!");
    assert_eq!(msg.sender, Sender::Bot);
    assert_eq!(msg.sender.to_string(), "FloatChat");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert!(!msg.is_error());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Sender::Bot, MessageType::Error, "It broke!");
    assert_eq!(msg.sender, Sender::Bot);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.mtype, MessageType::Error);
    assert!(msg.is_error());
}

#[test]
fn it_keeps_user_text_verbatim() {
    let msg = Message::new(Sender::User, "\tsalinity  near 40°S ");
    assert_eq!(msg.text, "\tsalinity  near 40°S ");
}

#[test]
fn it_previews_short_text_unchanged() {
    let msg = Message::new(Sender::User, "Find recent float deployments");
    assert_eq!(msg.preview(40), "Find recent float deployments");
}

#[test]
fn it_previews_text_at_the_limit_unchanged() {
    let text = "a".repeat(40);
    let msg = Message::new(Sender::User, &text);
    assert_eq!(msg.preview(40), text);
}

#[test]
fn it_previews_long_text_with_ellipsis() {
    let msg = Message::new(Sender::Bot, "Hi! Ask me anything about ARGO ocean data.");
    let preview = msg.preview(40);
    assert_eq!(preview, "Hi! Ask me anything about ARGO ocean ...");
    assert_eq!(preview.chars().count(), 40);
}

#[test]
fn it_previews_markup_replies() {
    let msg = Message::new(Sender::Bot, markup_reply_fixture());
    insta::assert_snapshot!(msg.preview(40), @"**Sea surface temperature, Pacific (2...");
}

#[test]
fn it_previews_text_across_lines() {
    let msg = Message::new(Sender::Bot, "Temperature: 18.9 °C\n\nSalinity: 35.1 PSU at 40°S");
    assert_eq!(msg.preview(40), "Temperature: 18.9 °C Salinity: 35.1 P...");
}

#[test]
fn it_joins_short_multiline_text_unchanged() {
    let msg = Message::new(Sender::Bot, "Depth 2000 m\nFloat 2902746");
    assert_eq!(msg.preview(40), "Depth 2000 m Float 2902746");
}

#[test]
fn it_previews_multibyte_text_by_characters() {
    let msg = Message::new(Sender::Bot, "°°°°°°°°°°");
    assert_eq!(msg.preview(5), "°°...");
}

#[test]
fn it_previews_long_questions() {
    let msg = Message::new(Sender::User, long_question_fixture());
    assert_eq!(msg.preview(40), "Show me temperature trends in the Pac...");
}
