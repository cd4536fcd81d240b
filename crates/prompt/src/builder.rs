//! Message builder for turning a persona spec into chat messages.

use crate::types::{ChatMessage, PromptSpec};

/// Directive appended to the system prompt when `tts_friendly` is set.
pub const TTS_DIRECTIVE: &str =
    "For TTS streaming: use short sentences with clear punctuation (.,!?). No markdown.";

/// Header placed before the numbered facts.
pub const MEMORY_HEADER: &str = "=== Memory Context ===";

/// Render the system prompt for a spec.
///
/// Lines appear in a fixed order, each only when it has content: persona,
/// style, constraints, output format, the TTS directive, then the memory
/// context with facts numbered from 1. Lines are joined with `\n` and no
/// trailing newline is added.
///
/// # Example
/// ```
/// use persona_prompt::{build_system_prompt, PromptSpec};
///
/// let spec = PromptSpec {
///     persona: "P".to_string(),
///     style: "S".to_string(),
///     tts_friendly: false,
///     facts: vec!["f1".to_string(), "f2".to_string()],
///     ..PromptSpec::default()
/// };
/// assert_eq!(
///     build_system_prompt(&spec),
///     "P\nStyle: S\n=== Memory Context ===\n1) f1\n2) f2"
/// );
/// ```
pub fn build_system_prompt(spec: &PromptSpec) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !spec.persona.is_empty() {
        lines.push(spec.persona.clone());
    }
    if !spec.style.is_empty() {
        lines.push(format!("Style: {}", spec.style));
    }
    if !spec.constraints.is_empty() {
        lines.push(format!("Constraints: {}", spec.constraints));
    }
    if !spec.output_format.is_empty() {
        lines.push(format!("Output format: {}", spec.output_format));
    }

    if spec.tts_friendly {
        lines.push(TTS_DIRECTIVE.to_string());
    }

    if !spec.facts.is_empty() {
        lines.push(MEMORY_HEADER.to_string());
        lines.extend(
            spec.facts
                .iter()
                .enumerate()
                .map(|(i, fact)| format!("{}) {}", i + 1, fact)),
        );
    }

    lines.join("\n")
}

/// Build the full message sequence for a request.
///
/// The result holds the system prompt, then each few-shot example as a
/// `user` and an `assistant` message (each side only when non-empty), then
/// the caller's transcript with roles and contents passed through verbatim.
///
/// `roles` and `contents` are parallel; if their lengths differ the
/// transcript stops at the shorter one.
///
/// # Example
/// ```
/// use persona_prompt::{build_messages, parse_spec};
///
/// let spec = parse_spec("few_shots:\n  - user: hi\n    assistant: hello\n");
/// let messages = build_messages(&spec, &["user"], &["bye"]);
/// let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
/// assert_eq!(roles, ["system", "user", "assistant", "user"]);
/// ```
pub fn build_messages<R, C>(spec: &PromptSpec, roles: &[R], contents: &[C]) -> Vec<ChatMessage>
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    if roles.len() != contents.len() {
        tracing::warn!(
            "Transcript has {} roles but {} contents; using the first {} entries",
            roles.len(),
            contents.len(),
            roles.len().min(contents.len())
        );
    }

    let mut messages = Vec::with_capacity(1 + spec.few_shots.len() * 2 + roles.len());
    messages.push(ChatMessage::system(build_system_prompt(spec)));

    for shot in &spec.few_shots {
        if !shot.user.is_empty() {
            messages.push(ChatMessage::user(shot.user.as_str()));
        }
        if !shot.assistant.is_empty() {
            messages.push(ChatMessage::assistant(shot.assistant.as_str()));
        }
    }

    messages.extend(
        roles
            .iter()
            .zip(contents)
            .map(|(role, content)| ChatMessage::new(role.as_ref(), content.as_ref())),
    );

    tracing::debug!(
        "Built {} messages ({} few-shot examples)",
        messages.len(),
        spec.few_shots.len()
    );

    messages
}

/// Stop sequences to attach to a request, or `None` when the spec has none.
pub fn attach_stop(spec: &PromptSpec) -> Option<&[String]> {
    if spec.stop.is_empty() {
        None
    } else {
        Some(spec.stop.as_slice())
    }
}
