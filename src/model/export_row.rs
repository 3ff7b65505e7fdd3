//! Flattened projection of a comment used for CSV output

use crate::error::ExportError;
use crate::model::record::{key_of, Record, RelatedRecordMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Fixed, ordered CSV header
pub const EXPORT_HEADERS: [&str; 6] = [
    "id",
    "author_name",
    "post_id",
    "post_title",
    "created_at",
    "body",
];

/// Foreign key linking a comment to its post
pub const POST_FOREIGN_KEY: &str = "post_id";

/// Collection the foreign key points into
pub const POST_COLLECTION: &str = "posts";

/// What to do when a comment references a post that was not fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRelatedPolicy {
    /// Fail the whole export
    #[default]
    Abort,
    /// Export the row with an empty `post_title`
    Blank,
}

/// One exported comment
///
/// Values keep their JSON types until serialization so that nested data can
/// be detected at encoding time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub id: Value,
    pub author_name: Value,
    pub post_id: Value,
    pub post_title: Value,
    pub created_at: Value,
    pub body: Value,
}

impl ExportRow {
    /// Project a comment onto the export columns
    ///
    /// `author` is dropped and replaced by `author_name`; `post_id` is kept and
    /// `post_title` is looked up in `related`.
    pub fn project(
        record: &Record,
        related: &RelatedRecordMap,
        policy: MissingRelatedPolicy,
    ) -> Result<Self, ExportError> {
        let author = record
            .get("author")
            .and_then(Value::as_object)
            .ok_or_else(|| ExportError::MissingField {
                record_id: record.id_label(),
                field: "author".to_string(),
            })?;

        let post_id = field(record, POST_FOREIGN_KEY);
        let post_title = match related.get(&post_id) {
            Some(post) => field(post, "title"),
            None => {
                let key = key_of(&post_id).unwrap_or_else(|| "null".to_string());
                match policy {
                    MissingRelatedPolicy::Abort => {
                        return Err(ExportError::MissingRelated {
                            record_id: record.id_label(),
                            foreign_key: POST_FOREIGN_KEY.to_string(),
                            key,
                        });
                    }
                    MissingRelatedPolicy::Blank => {
                        warn!(record_id = %record.id_label(), post_id = %key, "related post missing, exporting blank title");
                        Value::Null
                    }
                }
            }
        };

        Ok(Self {
            id: field(record, "id"),
            author_name: author.get("name").cloned().unwrap_or(Value::Null),
            post_id,
            post_title,
            created_at: field(record, "created_at"),
            body: field(record, "body"),
        })
    }

    /// Cell texts in header order
    ///
    /// Fails when a column holds an array or object, which has no CSV form.
    pub fn cells(&self) -> Result<[String; 6], ExportError> {
        let columns = [
            &self.id,
            &self.author_name,
            &self.post_id,
            &self.post_title,
            &self.created_at,
            &self.body,
        ];

        let mut cells: [String; 6] = Default::default();
        for (i, value) in columns.into_iter().enumerate() {
            cells[i] = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ExportError::NonScalar {
                        record_id: key_of(&self.id).unwrap_or_else(|| "?".to_string()),
                        column: EXPORT_HEADERS[i],
                    });
                }
            };
        }
        Ok(cells)
    }
}

fn field(record: &Record, name: &str) -> Value {
    record.get(name).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn posts() -> RelatedRecordMap {
        [("10".to_string(), record(json!({ "id": 10, "title": "Hello" })))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_project_flattens_author_and_adds_post_title() {
        let comment = record(json!({
            "id": 1,
            "author": { "name": "Alice" },
            "post_id": 10,
            "created_at": "2024-01-01",
            "body": "hi"
        }));

        let row = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort).unwrap();

        assert_eq!(
            row,
            ExportRow {
                id: json!(1),
                author_name: json!("Alice"),
                post_id: json!(10),
                post_title: json!("Hello"),
                created_at: json!("2024-01-01"),
                body: json!("hi"),
            }
        );
        let cells = row.cells().unwrap();
        assert_eq!(cells, ["1", "Alice", "10", "Hello", "2024-01-01", "hi"]);
        assert!(!cells.iter().any(|c| c.contains("author")));
    }

    #[test]
    fn test_project_ignores_extra_fields_and_order() {
        let comment = record(json!({
            "body": "later",
            "extra": { "nested": true },
            "created_at": "2024-02-02T10:00:00Z",
            "post_id": "10",
            "author": { "name": "Bob", "email": "bob@example.com" },
            "id": "c-7"
        }));

        let cells = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort)
            .unwrap()
            .cells()
            .unwrap();
        assert_eq!(
            cells,
            ["c-7", "Bob", "10", "Hello", "2024-02-02T10:00:00Z", "later"]
        );
    }

    #[test]
    fn test_missing_related_aborts_by_default() {
        let comment = record(json!({ "id": 2, "author": { "name": "A" }, "post_id": 99 }));
        let err = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort).unwrap_err();
        match err {
            ExportError::MissingRelated { record_id, key, .. } => {
                assert_eq!(record_id, "2");
                assert_eq!(key, "99");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_related_blank_policy() {
        let comment = record(json!({ "id": 2, "author": { "name": "A" }, "post_id": 99 }));
        let row = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Blank).unwrap();
        assert_eq!(row.post_title, Value::Null);
        assert_eq!(row.cells().unwrap()[3], "");
    }

    #[test]
    fn test_missing_author_is_a_row_failure() {
        let comment = record(json!({ "id": 3, "post_id": 10 }));
        let err = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort).unwrap_err();
        assert!(matches!(err, ExportError::MissingField { ref field, .. } if field == "author"));
        assert!(!err.is_serialization());
    }

    #[test]
    fn test_author_without_name_exports_empty_cell() {
        let comment = record(json!({ "id": 4, "author": {}, "post_id": 10 }));
        let row = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort).unwrap();
        assert_eq!(row.cells().unwrap()[1], "");
    }

    #[test]
    fn test_nested_value_fails_serialization() {
        let comment = record(json!({
            "id": 5,
            "author": { "name": "A" },
            "post_id": 10,
            "body": { "rich": "text" }
        }));
        let row = ExportRow::project(&comment, &posts(), MissingRelatedPolicy::Abort).unwrap();
        let err = row.cells().unwrap_err();
        assert!(err.is_serialization());
        assert!(matches!(err, ExportError::NonScalar { column: "body", .. }));
    }
}
