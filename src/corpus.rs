//! Pre-annotated documents handed to the analyzer by an upstream pipeline.
//!
//! Each JSONL line holds one [`Document`]: the raw text, optional sentence
//! spans and the entity mentions an upstream NER step produced. Offsets are
//! UTF-8 byte offsets into `text`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{NegexError, Result};

/// A UMLS concept linked to a medical mention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmlsConceptLink {
    pub cui: Option<String>,
    pub name: Option<String>,
    pub definition: Option<String>,
    pub tuis: Vec<String>,
    pub aliases: Vec<String>,
    pub score: Option<f64>,
}

/// An entity mention with document-level offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub begin: usize,
    pub end: usize,
    #[serde(default)]
    pub ner_type: Option<String>,
    #[serde(default)]
    pub umls_entities: Vec<UmlsConceptLink>,
}

impl EntityMention {
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            ner_type: None,
            umls_entities: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn contains(&self, other: &EntityMention) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub begin: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub sentences: Vec<SentenceSpan>,
    #[serde(default)]
    pub mentions: Vec<EntityMention>,
}

/// Read-only view of one sentence and the mentions inside it.
#[derive(Debug, Clone)]
pub struct Sentence<'a> {
    pub index: usize,
    pub begin: usize,
    pub end: usize,
    pub text: &'a str,
    pub mentions: Vec<&'a EntityMention>,
}

impl<'a> Sentence<'a> {
    /// Text covered by a mention of this sentence.
    pub fn mention_text(&self, mention: &EntityMention) -> &'a str {
        &self.text[mention.begin - self.begin..mention.end - self.begin]
    }
}

impl Document {
    /// Check that every span is ordered, in bounds and on a char boundary.
    pub fn validate(&self) -> Result<()> {
        let spans = self
            .sentences
            .iter()
            .map(|s| ("sentence", s.begin, s.end))
            .chain(self.mentions.iter().map(|m| ("mention", m.begin, m.end)));
        for (kind, begin, end) in spans {
            let valid = begin <= end
                && end <= self.text.len()
                && self.text.is_char_boundary(begin)
                && self.text.is_char_boundary(end);
            if !valid {
                return Err(NegexError::InvalidSpan {
                    document: self.id.clone(),
                    kind,
                    begin,
                    end,
                    len: self.text.len(),
                });
            }
        }
        Ok(())
    }

    /// Sentence views in document order; no sentence spans means one sentence.
    ///
    /// A mention is attached to the sentence that fully contains it. Mentions
    /// straddling a boundary belong to no sentence.
    pub fn sentences(&self) -> Vec<Sentence<'_>> {
        let whole = [SentenceSpan {
            begin: 0,
            end: self.text.len(),
        }];
        let spans: &[SentenceSpan] = if self.sentences.is_empty() {
            &whole
        } else {
            &self.sentences
        };

        spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let mut mentions: Vec<&EntityMention> = self
                    .mentions
                    .iter()
                    .filter(|m| span.begin <= m.begin && m.end <= span.end)
                    .collect();
                mentions.sort_by_key(|m| (m.begin, m.end));
                Sentence {
                    index,
                    begin: span.begin,
                    end: span.end,
                    text: &self.text[span.begin..span.end],
                    mentions,
                }
            })
            .collect()
    }
}

/// Parse JSONL content, one document per non-blank line.
pub fn parse_jsonl(contents: &str, path: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let document: Document =
            serde_json::from_str(line).map_err(|source| NegexError::Corpus {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        document.validate()?;
        documents.push(document);
    }
    debug!(path = %path.display(), documents = documents.len(), "parsed documents");
    Ok(documents)
}

pub fn load_jsonl(path: &Path) -> Result<Vec<Document>> {
    let contents = fs::read_to_string(path)?;
    parse_jsonl(&contents, path)
}

/// Resolve an input path to the JSONL files it names, sorted by path.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("jsonl")
        {
            files.push(entry.into_path());
        }
    }
    info!(root = %path.display(), files = files.len(), "collected input files");
    Ok(files)
}
