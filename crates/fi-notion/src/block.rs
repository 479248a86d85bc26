use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value, json};

/// One styled run inside a rich-text array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: false,
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: true,
        }
    }

    fn to_json(&self) -> Value {
        let mut run = json!({
            "type": "text",
            "text": { "content": self.content },
        });
        if self.bold {
            run["annotations"] = json!({ "bold": true });
        }
        run
    }

    /// Read a run from a Notion rich-text object.
    ///
    /// `plain_text` is what Notion returns on reads; `text.content` is what we
    /// send on writes. Either is accepted.
    fn from_json(value: &Value) -> Self {
        let content = value
            .get("plain_text")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("text")
                    .and_then(|text| text.get("content"))
                    .and_then(Value::as_str)
            })
            .unwrap_or_default()
            .to_string();
        let bold = value
            .get("annotations")
            .and_then(|annotations| annotations.get("bold"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { content, bold }
    }
}

fn rich_text_to_json(runs: &[TextRun]) -> Value {
    Value::Array(runs.iter().map(TextRun::to_json).collect())
}

fn rich_text_from_json(body: &Value) -> Vec<TextRun> {
    body.get("rich_text")
        .and_then(Value::as_array)
        .map(|runs| runs.iter().map(TextRun::from_json).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    /// Notion block type name for this level.
    pub fn block_type(&self) -> &'static str {
        match self {
            Self::One => "heading_1",
            Self::Two => "heading_2",
            Self::Three => "heading_3",
        }
    }

    fn from_block_type(block_type: &str) -> Option<Self> {
        match block_type {
            "heading_1" => Some(Self::One),
            "heading_2" => Some(Self::Two),
            "heading_3" => Some(Self::Three),
            _ => None,
        }
    }
}

/// Block payload, independent of identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Heading {
        level: HeadingLevel,
        text: Vec<TextRun>,
        /// Notion only accepts children under toggleable headings.
        toggleable: bool,
    },
    Paragraph(Vec<TextRun>),
    Divider,
    /// Any block type we do not model; carries the Notion type name.
    Other(String),
}

impl BlockContent {
    /// Toggleable heading with a single plain run.
    pub fn section_heading(level: HeadingLevel, label: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: vec![TextRun::plain(label)],
            toggleable: true,
        }
    }

    pub fn paragraph(runs: Vec<TextRun>) -> Self {
        Self::Paragraph(runs)
    }

    /// Paragraph holding a single empty run (renders as a blank line).
    pub fn blank_line() -> Self {
        Self::Paragraph(vec![TextRun::plain("")])
    }

    /// Notion block type name.
    pub fn block_type(&self) -> &str {
        match self {
            Self::Heading { level, .. } => level.block_type(),
            Self::Paragraph(_) => "paragraph",
            Self::Divider => "divider",
            Self::Other(block_type) => block_type,
        }
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            Self::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn rich_text(&self) -> &[TextRun] {
        match self {
            Self::Heading { text, .. } => text,
            Self::Paragraph(runs) => runs,
            Self::Divider | Self::Other(_) => &[],
        }
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.rich_text()
            .iter()
            .map(|run| run.content.as_str())
            .collect()
    }

    /// Serialize as an append payload (`{"object":"block","type":...,<type>:{...}}`).
    pub fn to_json(&self) -> Result<Value> {
        let body = match self {
            Self::Heading {
                text, toggleable, ..
            } => json!({
                "rich_text": rich_text_to_json(text),
                "is_toggleable": toggleable,
            }),
            Self::Paragraph(runs) => json!({ "rich_text": rich_text_to_json(runs) }),
            Self::Divider => json!({}),
            Self::Other(block_type) => bail!("cannot write unsupported block type '{block_type}'"),
        };
        let block_type = self.block_type();
        let mut object = Map::new();
        object.insert("object".to_string(), json!("block"));
        object.insert("type".to_string(), json!(block_type));
        object.insert(block_type.to_string(), body);
        Ok(Value::Object(object))
    }

    fn from_json(value: &Value) -> Result<Self> {
        let block_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("block object has no type"))?;
        let body = value.get(block_type).cloned().unwrap_or(Value::Null);

        if let Some(level) = HeadingLevel::from_block_type(block_type) {
            return Ok(Self::Heading {
                level,
                text: rich_text_from_json(&body),
                toggleable: body
                    .get("is_toggleable")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            });
        }
        Ok(match block_type {
            "paragraph" => Self::Paragraph(rich_text_from_json(&body)),
            "divider" => Self::Divider,
            other => Self::Other(other.to_string()),
        })
    }
}

/// A block that exists in Notion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: String,
    pub has_children: bool,
    pub content: BlockContent,
}

impl Block {
    pub fn from_json(value: &Value) -> Result<Self> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("block object has no id"))?
            .to_string();
        let has_children = value
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let content =
            BlockContent::from_json(value).with_context(|| format!("malformed block {id}"))?;
        Ok(Self {
            id,
            has_children,
            content,
        })
    }

    /// Serialize the way Notion returns blocks from a listing.
    pub fn to_json(&self) -> Result<Value> {
        let mut value = self.content.to_json()?;
        value["id"] = json!(self.id);
        value["has_children"] = json!(self.has_children);
        Ok(value)
    }

    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }
}

/// First heading of `level` whose text contains `needle`, ignoring case.
pub fn find_heading<'a>(blocks: &'a [Block], level: HeadingLevel, needle: &str) -> Option<&'a Block> {
    let needle = needle.to_lowercase();
    blocks.iter().find(|block| {
        block.content.heading_level() == Some(level)
            && block.plain_text().to_lowercase().contains(&needle)
    })
}
