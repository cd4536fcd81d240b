//! Parser for persona files.
//!
//! Persona files use a small, line-oriented YAML subset:
//!
//! ```yaml
//! persona: |
//!   You are Mira, the museum guide.
//!   You speak to visitors in person.
//! style: "warm, brief"
//! tts_friendly: yes
//! facts:
//!   - "The museum opens at 9am"
//! stop:
//!   - "User:"
//! few_shots:
//!   - user: "Where is the cafe?"
//!     assistant: "Down the stairs, on your left."
//! ```
//!
//! Parsing never fails. Lines the parser cannot place are skipped with a
//! warning and the rest of the file is still read.

use crate::types::{FewShotExample, PromptSpec};

/// Named list sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Facts,
    Stop,
    FewShots,
}

impl Section {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "facts" => Some(Self::Facts),
            "stop" => Some(Self::Stop),
            "few_shots" => Some(Self::FewShots),
            _ => None,
        }
    }
}

/// An open `key: |` literal block.
#[derive(Debug)]
struct Block {
    /// Lower-cased key that opened the block
    key: String,
    /// Indent of the line holding the key
    key_indent: usize,
    /// Indent of the first non-blank content line
    base_indent: Option<usize>,
    lines: Vec<String>,
    /// Section to return to once the block closes
    resume: Option<Section>,
}

impl Block {
    /// Offer a line to the block. Returns `false` when the line ends the
    /// block; that line has not been consumed.
    fn accept(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // Blank lines before the first content line do not count.
            if self.base_indent.is_some() {
                self.lines.push(String::new());
            }
            return true;
        }

        let indent = indent_width(line);
        let base = match self.base_indent {
            Some(base) => base,
            None if indent > self.key_indent => {
                self.base_indent = Some(indent);
                indent
            }
            None => return trimmed.starts_with('#'),
        };

        if indent < base {
            // Comments outside the block's indentation are skipped.
            return trimmed.starts_with('#');
        }

        self.lines.push(strip_indent(line, base).to_string());
        true
    }

    fn text(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

#[derive(Debug)]
enum State {
    Normal,
    InSection(Section),
    InBlock(Block),
}

/// What the driver does after feeding a line.
enum Step {
    Next,
    /// Feed the same line again under the new state.
    Repeat,
}

struct Parser<'a> {
    spec: &'a mut PromptSpec,
    state: State,
    pending_shot: Option<FewShotExample>,
    line_no: usize,
}

/// Parse persona text into a fresh [`PromptSpec`].
///
/// # Example
/// ```
/// use persona_prompt::parse_spec;
///
/// let spec = parse_spec("persona: \"You are Mira.\"\nfacts:\n  - Opens at 9am\n");
/// assert_eq!(spec.persona, "You are Mira.");
/// assert_eq!(spec.facts, vec!["Opens at 9am".to_string()]);
/// ```
pub fn parse_spec(text: &str) -> PromptSpec {
    let mut spec = PromptSpec::default();
    spec.parse_yaml(text);
    spec
}

impl PromptSpec {
    /// Reset this spec to its defaults, then populate it from persona text.
    pub fn parse_yaml(&mut self, text: &str) {
        *self = PromptSpec::default();

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();

        let mut parser = Parser {
            spec: &mut *self,
            state: State::Normal,
            pending_shot: None,
            line_no: 0,
        };

        let mut idx = 0;
        while idx < lines.len() {
            parser.line_no = idx + 1;
            match parser.feed(lines[idx]) {
                Step::Next => idx += 1,
                Step::Repeat => {}
            }
        }
        parser.finish();

        tracing::debug!(
            "Parsed persona spec: {} facts, {} stop sequences, {} few-shot examples",
            self.facts.len(),
            self.stop.len(),
            self.few_shots.len()
        );
    }

    /// Parse persona text into a new spec.
    pub fn from_yaml_str(text: &str) -> Self {
        parse_spec(text)
    }
}

impl Parser<'_> {
    fn feed(&mut self, line: &str) -> Step {
        if let State::InBlock(block) = &mut self.state {
            if block.accept(line) {
                return Step::Next;
            }
            self.close_block();
            return Step::Repeat;
        }

        self.classify(line);
        Step::Next
    }

    fn classify(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let indent = indent_width(line);

        if !trimmed.starts_with('-') {
            match split_key_value(trimmed) {
                Some((key, value)) if opens_block(value) => {
                    self.open_block(key, indent);
                    return;
                }
                Some((key, "")) if indent == 0 => {
                    self.enter_section(key);
                    return;
                }
                Some((key, value)) if indent == 0 => {
                    self.set_scalar(key, value);
                    return;
                }
                None if indent == 0 => {
                    tracing::warn!(
                        line = self.line_no,
                        "Skipping unrecognized top-level line: {}",
                        trimmed
                    );
                    return;
                }
                _ => {}
            }
        }

        match self.section() {
            Some(Section::Facts) => self.push_item(trimmed, Section::Facts),
            Some(Section::Stop) => self.push_item(trimmed, Section::Stop),
            Some(Section::FewShots) => self.few_shot_line(line, trimmed),
            None => tracing::debug!(
                line = self.line_no,
                "Ignoring line outside a known section: {}",
                trimmed
            ),
        }
    }

    fn section(&self) -> Option<Section> {
        match self.state {
            State::InSection(section) => Some(section),
            State::InBlock(ref block) => block.resume,
            State::Normal => None,
        }
    }

    fn enter_section(&mut self, key: &str) {
        self.flush_shot();

        let name = key.to_lowercase();
        self.state = match Section::from_key(&name) {
            Some(section) => State::InSection(section),
            None => {
                tracing::warn!(line = self.line_no, "Unknown section '{}' ignored", key);
                State::Normal
            }
        };
    }

    fn leave_section(&mut self) {
        self.flush_shot();
        self.state = State::Normal;
    }

    fn set_scalar(&mut self, key: &str, value: &str) {
        self.leave_section();

        let value = strip_quotes(value);
        match key.to_lowercase().as_str() {
            "persona" => self.spec.persona = value.to_string(),
            "style" => self.spec.style = value.to_string(),
            "constraints" => self.spec.constraints = value.to_string(),
            "output_format" => self.spec.output_format = value.to_string(),
            "tts_friendly" => {
                self.spec.tts_friendly = parse_flag(value).unwrap_or_else(|| {
                    tracing::warn!(
                        line = self.line_no,
                        "Unrecognized tts_friendly value '{}', treating as false",
                        value
                    );
                    false
                });
            }
            _ => tracing::warn!(line = self.line_no, "Unknown key '{}' ignored", key),
        }
    }

    fn push_item(&mut self, trimmed: &str, section: Section) {
        let Some(rest) = trimmed.strip_prefix('-') else {
            tracing::debug!(line = self.line_no, "Ignoring non-item line: {}", trimmed);
            return;
        };

        let item = strip_quotes(rest);
        if item.is_empty() {
            tracing::debug!(line = self.line_no, "Skipping empty list item");
            return;
        }

        let target = match section {
            Section::Facts => &mut self.spec.facts,
            Section::Stop => &mut self.spec.stop,
            Section::FewShots => return,
        };
        target.push(item.to_string());
    }

    fn few_shot_line(&mut self, line: &str, trimmed: &str) {
        if let Some(rest) = trimmed.strip_prefix('-') {
            self.flush_shot();
            let mut shot = FewShotExample::default();

            let inline = rest.trim();
            let mut block_key = None;
            if !inline.is_empty() {
                match split_key_value(inline) {
                    Some((key, value)) if opens_block(value) => block_key = Some(key),
                    _ => fill_shot(&mut shot, inline, self.line_no),
                }
            }
            self.pending_shot = Some(shot);

            if let Some(key) = block_key {
                // The key sits just after the dash.
                let key_indent = indent_width(line) + 1 + indent_width(rest);
                self.open_block(key, key_indent);
            }
            return;
        }

        match self.pending_shot.as_mut() {
            Some(shot) => fill_shot(shot, trimmed, self.line_no),
            None => tracing::warn!(
                line = self.line_no,
                "Few-shot field outside of an item ignored: {}",
                trimmed
            ),
        }
    }

    fn flush_shot(&mut self) {
        if let Some(shot) = self.pending_shot.take() {
            if shot.is_empty() {
                tracing::debug!("Dropping empty few-shot example");
            } else {
                self.spec.few_shots.push(shot);
            }
        }
    }

    fn open_block(&mut self, key: &str, indent: usize) {
        let resume = if indent == 0 {
            self.leave_section();
            None
        } else {
            self.section()
        };

        self.state = State::InBlock(Block {
            key: key.to_lowercase(),
            key_indent: indent,
            base_indent: None,
            lines: Vec::new(),
            resume,
        });
    }

    fn close_block(&mut self) {
        let State::InBlock(block) = std::mem::replace(&mut self.state, State::Normal) else {
            return;
        };

        let text = block.text();
        match block.key.as_str() {
            "persona" => self.spec.persona = text,
            "style" => self.spec.style = text,
            "constraints" => self.spec.constraints = text,
            "output_format" => self.spec.output_format = text,
            "user" | "assistant" if block.resume == Some(Section::FewShots) => {
                if let Some(shot) = self.pending_shot.as_mut() {
                    if block.key == "user" {
                        shot.user = text;
                    } else {
                        shot.assistant = text;
                    }
                }
            }
            other => tracing::debug!("Discarding block for unrecognized key '{}'", other),
        }

        if let Some(section) = block.resume {
            self.state = State::InSection(section);
        }
    }

    fn finish(&mut self) {
        if matches!(self.state, State::InBlock(_)) {
            self.close_block();
        }
        self.flush_shot();
    }
}

/// Fill one field of a few-shot example from a `key: value` fragment.
fn fill_shot(shot: &mut FewShotExample, fragment: &str, line_no: usize) {
    let Some((key, value)) = split_key_value(fragment) else {
        tracing::warn!(line = line_no, "Malformed few-shot field ignored: {}", fragment);
        return;
    };

    let value = strip_quotes(value).to_string();
    match key.to_lowercase().as_str() {
        "user" => shot.user = value,
        "assistant" => shot.assistant = value,
        _ => tracing::warn!(line = line_no, "Unknown few-shot key '{}' ignored", key),
    }
}

/// A value ending in `|` starts a literal block; text before the `|` is dropped.
fn opens_block(value: &str) -> bool {
    value.ends_with('|')
}

/// Split `key: value` at the first colon. The key must be non-empty.
fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Interpret a boolean flag value. `None` for anything unrecognized.
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Remove one matching pair of quotes wrapping the whole trimmed value.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Leading whitespace width; a tab counts as two columns.
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars()
        .map_while(|ch| match ch {
            ' ' => Some(1),
            '\t' => Some(2),
            _ => None,
        })
        .sum()
}

/// Drop up to `width` columns of leading whitespace.
fn strip_indent(line: &str, width: usize) -> &str {
    let mut columns = 0;
    for (pos, ch) in line.char_indices() {
        if columns >= width {
            return &line[pos..];
        }
        match ch {
            ' ' => columns += 1,
            '\t' => columns += 2,
            _ => return &line[pos..],
        }
    }
    ""
}
