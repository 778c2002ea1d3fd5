//! The source path grammar.
//!
//! A path is a `/`-separated list of segments. A segment is a column or
//! table name, optionally preceded by a join condition and followed by a
//! sort key annotation:
//!
//! ```text
//! [id=road_id]road_tags{sortKey=road}/tags
//! ```
//!
//! `[local=remote]table` follows the foreign key equality from the current
//! table to `table`.

use sourcepath_core::{schema::tags, Error, Result};
use std::{fmt, str::FromStr};

const SORT_KEY: &str = "sortKey";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePath {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Join condition leading into `name`, if any.
    pub join: Option<JoinCondition>,

    /// Column or table name.
    pub name: String,

    pub sort_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCondition {
    /// Column of the table joined from.
    pub local: String,

    /// Column of the table joined to.
    pub remote: String,
}

impl SourcePath {
    pub fn new() -> SourcePath {
        SourcePath::default()
    }

    /// A path reading a single column of the current table.
    pub fn column(name: impl Into<String>) -> SourcePath {
        SourcePath::new().then(Segment::column(name))
    }

    #[must_use]
    pub fn then(mut self, segment: Segment) -> SourcePath {
        self.segments.push(segment);
        self
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of joins along the path.
    pub fn join_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_join()).count()
    }

    /// Tables reached by joins, in order.
    pub fn joined_tables(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments
            .iter()
            .filter(|s| s.is_join())
            .map(|s| s.name.as_str())
    }
}

impl Segment {
    pub fn column(name: impl Into<String>) -> Segment {
        Segment {
            join: None,
            name: name.into(),
            sort_key: None,
        }
    }

    pub fn join(
        local: impl Into<String>,
        remote: impl Into<String>,
        table: impl Into<String>,
    ) -> Segment {
        Segment {
            join: Some(JoinCondition {
                local: local.into(),
                remote: remote.into(),
            }),
            name: table.into(),
            sort_key: None,
        }
    }

    #[must_use]
    pub fn sort_key(mut self, key: impl Into<String>) -> Segment {
        self.sort_key = Some(key.into());
        self
    }

    pub fn is_join(&self) -> bool {
        self.join.is_some()
    }

    fn parse(src: &str, path: &str) -> Result<Segment> {
        let invalid = |reason: &str| Error::invalid_path(path, reason);

        let (join, rest) = match src.strip_prefix('[') {
            Some(rest) => {
                let (condition, rest) = rest.split_once(']').ok_or_else(|| invalid("unclosed `[`"))?;
                let (local, remote) = condition
                    .split_once('=')
                    .ok_or_else(|| invalid("join condition without `=`"))?;

                check_name(local, path)?;
                check_name(remote, path)?;

                let join = JoinCondition {
                    local: local.to_string(),
                    remote: remote.to_string(),
                };

                (Some(join), rest)
            }
            None => (None, src),
        };

        let (name, sort_key) = match rest.split_once('{') {
            Some((name, annotation)) => {
                let annotation = annotation
                    .strip_suffix('}')
                    .ok_or_else(|| invalid("unclosed `{`"))?;
                let (key, value) = annotation
                    .split_once('=')
                    .ok_or_else(|| invalid("annotation without `=`"))?;

                if key != SORT_KEY {
                    return Err(invalid(&format!("unknown annotation `{key}`")));
                }

                check_name(value, path)?;
                (name, Some(value.to_string()))
            }
            None => (rest, None),
        };

        check_name(name, path)?;

        Ok(Segment {
            join,
            name: name.to_string(),
            sort_key,
        })
    }
}

fn check_name(name: &str, path: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_path(path, "empty name"));
    }

    if let Some(c) = tags::reserved_char(name) {
        return Err(Error::invalid_path(
            path,
            format!("unexpected `{c}` in `{name}`"),
        ));
    }

    Ok(())
}

impl FromStr for SourcePath {
    type Err = Error;

    fn from_str(src: &str) -> Result<SourcePath> {
        if src.is_empty() {
            return Err(Error::invalid_path(src, "empty path"));
        }

        let segments = src
            .split('/')
            .map(|segment| Segment::parse(segment, src))
            .collect::<Result<Vec<_>>>()?;

        Ok(SourcePath { segments })
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }

            fmt::Display::fmt(segment, f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(join) = &self.join {
            write!(f, "[{}={}]", join.local, join.remote)?;
        }

        f.write_str(&self.name)?;

        if let Some(sort_key) = &self.sort_key {
            write!(f, "{{{SORT_KEY}={sort_key}}}")?;
        }

        Ok(())
    }
}

impl From<SourcePath> for String {
    fn from(value: SourcePath) -> Self {
        value.to_string()
    }
}
