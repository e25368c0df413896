//! Rewriting SSML before synthesis: swap voices, slow down long numbers,
//! and strip markup for a plain-text transcript.
//!
//! Run with: `cargo run --example rewrite_voice`
#![allow(clippy::expect_used)]

use ssmloxide::{parse_ssml, serialize, Node, Tag};

/// Replaces every `voice name="from"` with `to`, at any depth.
fn swap_voice(tag: &mut Tag, from: &str, to: &str) {
    if tag.name == "voice" && tag.attribute("name") == Some(from) {
        tag.set_attribute("name", to);
    }
    for child in tag.child_tags_mut() {
        swap_voice(child, from, to);
    }
}

/// Wraps runs of digits longer than four characters in a slow prosody tag.
fn slow_down_numbers(tag: &mut Tag) {
    let children = std::mem::take(&mut tag.children);
    for child in children {
        match child {
            Node::Text { content } if content.trim().len() > 4
                && content.trim().chars().all(|c| c.is_ascii_digit()) =>
            {
                tag.push_child(
                    Tag::new("prosody")
                        .with_attribute("rate", "slow")
                        .with_child(Node::text(content)),
                );
            }
            Node::Tag(mut inner) => {
                slow_down_numbers(&mut inner);
                tag.push_child(inner);
            }
            text @ Node::Text { .. } => tag.push_child(text),
        }
    }
}

fn main() {
    let input = r#"<speak>
  <voice name="Joanna">Your confirmation code is <say-as interpret-as="digits">482913</say-as>.</voice>
  <break time="500ms"/>
  <voice name="Matthew">Thanks &amp; goodbye!</voice>
</speak>"#;

    let mut root = parse_ssml(input).expect("failed to parse SSML");
    let speak = root.as_tag_mut().expect("root is always a tag");

    swap_voice(speak, "Joanna", "Salli");
    slow_down_numbers(speak);

    println!("Rewritten SSML:\n{}\n", serialize(&root));
    println!("Transcript: {}", root.text_content().split_whitespace().collect::<Vec<_>>().join(" "));

    let voices: Vec<_> = root
        .descendants()
        .filter_map(Node::as_tag)
        .filter(|t| t.name == "voice")
        .filter_map(|t| t.attribute("name"))
        .collect();
    println!("Voices used: {}", voices.join(", "));
}
