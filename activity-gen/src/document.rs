use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::catalog::{Catalog, Category};
use crate::error::GenError;
use crate::generator::ActivityRecord;

/// Default name of the generated file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "mock-data.json";

/// Shape of the JSON document. The shapes are not interchangeable for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schema {
    /// `[{"2019-01-01": "gym"}, ...]`
    DateKeyed,
    /// `[{"date": "2019-01-01", "activity": {"name": "gym", "active": true}}, ...]`
    Nested,
    /// `{"activities": {"act-0": {"date", "name", "categoryId"}}, "categories": {id: {...}}}`
    #[default]
    Composite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Two space indentation
    #[default]
    Pretty,
    Compact,
}

/// Counts reported once a document has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub schema: Schema,
    pub activities: usize,
    pub categories: usize,
}

/// The generated records together with the catalog they were drawn from, serialized according
/// to its [Schema](crate::document::Schema)
#[derive(Debug)]
pub struct Document<'a, 'c> {
    schema: Schema,
    catalog: &'c Catalog,
    records: &'a [ActivityRecord<'c>],
}

impl<'a, 'c> Document<'a, 'c> {
    /// # Errors
    /// Errors when the composite schema is requested but an activity of `catalog` has no
    /// category
    pub fn new(
        schema: Schema,
        catalog: &'c Catalog,
        records: &'a [ActivityRecord<'c>],
    ) -> Result<Self, GenError> {
        if schema == Schema::Composite {
            if let Some(activity) = catalog
                .activities()
                .iter()
                .find(|a| a.category_id.is_none())
            {
                return Err(GenError::Uncategorized(activity.name.clone()));
            }
        }
        Ok(Document {
            schema,
            catalog,
            records,
        })
    }

    #[must_use]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    #[must_use]
    pub fn records(&self) -> &'a [ActivityRecord<'c>] {
        self.records
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let categories = match self.schema {
            Schema::Composite => self.catalog.categories().len(),
            Schema::DateKeyed | Schema::Nested => 0,
        };
        Summary {
            schema: self.schema,
            activities: self.records.len(),
            categories,
        }
    }

    /// # Errors
    /// Errors when serialization or the underlying writer fails
    pub fn to_writer<W: Write>(&self, writer: W, format: OutputFormat) -> Result<(), GenError> {
        match format {
            OutputFormat::Pretty => serde_json::to_writer_pretty(writer, self)?,
            OutputFormat::Compact => serde_json::to_writer(writer, self)?,
        }
        Ok(())
    }
}

/// Creates or truncates the file at `path` and writes `document` to it as UTF-8 JSON.
/// A failed write may leave a truncated file behind.
///
/// # Errors
/// Errors when the file cannot be created or written
pub fn write_json(
    path: impl AsRef<Path>,
    document: &Document<'_, '_>,
    format: OutputFormat,
) -> Result<Summary, GenError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    document.to_writer(&mut writer, format)?;
    writer.flush()?;
    debug!("Wrote {:?} document to {}", document.schema, path.display());
    Ok(document.summary())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema {
            Schema::Composite => write!(
                f,
                "Generated {} activities across {} categories",
                self.activities, self.categories
            ),
            Schema::DateKeyed | Schema::Nested => {
                write!(f, "Generated {} activities", self.activities)
            }
        }
    }
}

/// `YYYY-MM-DD`
struct IsoDate(NaiveDate);

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0.format("%Y-%m-%d"))
    }
}

struct DateKeyedRecord<'r, 'c>(&'r ActivityRecord<'c>);

impl Serialize for DateKeyedRecord<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&IsoDate(self.0.date), &self.0.activity.name)?;
        map.end()
    }
}

struct NestedRecord<'r, 'c>(&'r ActivityRecord<'c>);

impl Serialize for NestedRecord<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ActivityRecord", 2)?;
        state.serialize_field("date", &IsoDate(self.0.date))?;
        state.serialize_field("activity", self.0.activity)?;
        state.end()
    }
}

struct CompositeRecord<'r, 'c>(&'r ActivityRecord<'c>);

impl Serialize for CompositeRecord<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Activity", 3)?;
        state.serialize_field("date", &IsoDate(self.0.date))?;
        state.serialize_field("name", &self.0.activity.name)?;
        state.serialize_field("categoryId", &self.0.activity.category_id)?;
        state.end()
    }
}

/// `act-<index>` keyed map, in generation order
struct CompositeRecords<'a, 'c>(&'a [ActivityRecord<'c>]);

impl Serialize for CompositeRecords<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, record) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("act-{}", i), &CompositeRecord(record))?;
        }
        map.end()
    }
}

/// Categories keyed by id, in declaration order
struct CategoryMap<'c>(&'c [Category]);

impl Serialize for CategoryMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in self.0 {
            map.serialize_entry(&category.id, category)?;
        }
        map.end()
    }
}

impl Serialize for Document<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.schema {
            Schema::DateKeyed => {
                let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
                for record in self.records {
                    seq.serialize_element(&DateKeyedRecord(record))?;
                }
                seq.end()
            }
            Schema::Nested => {
                let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
                for record in self.records {
                    seq.serialize_element(&NestedRecord(record))?;
                }
                seq.end()
            }
            Schema::Composite => {
                let mut state = serializer.serialize_struct("Document", 2)?;
                state.serialize_field("activities", &CompositeRecords(self.records))?;
                state.serialize_field("categories", &CategoryMap(self.catalog.categories()))?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Activity;
    use serde_json::{json, Value};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn to_value(document: &Document<'_, '_>) -> Value {
        serde_json::to_value(document).unwrap()
    }

    #[test]
    fn test_date_keyed_shape() {
        let catalog = Catalog::classic().unwrap();
        let records = vec![
            ActivityRecord {
                date: date(2019, 1, 1),
                activity: catalog.activity(3).unwrap(),
            },
            ActivityRecord {
                date: date(2019, 1, 2),
                activity: catalog.activity(0).unwrap(),
            },
        ];
        let document = Document::new(Schema::DateKeyed, &catalog, &records).unwrap();
        assert_eq!(
            to_value(&document),
            json!([{"2019-01-01": "gym"}, {"2019-01-02": "nothing"}])
        );
        assert_eq!(document.summary().to_string(), "Generated 2 activities");
    }

    #[test]
    fn test_nested_shape() {
        let catalog = Catalog::classic().unwrap();
        let records = vec![ActivityRecord {
            date: date(2019, 3, 9),
            activity: catalog.activity(1).unwrap(),
        }];
        let document = Document::new(Schema::Nested, &catalog, &records).unwrap();
        assert_eq!(
            to_value(&document),
            json!([{"date": "2019-03-09", "activity": {"name": "sick", "active": false}}])
        );
    }

    #[test]
    fn test_composite_shape() {
        let catalog = Catalog::categorized().unwrap();
        let records = vec![
            ActivityRecord {
                date: date(2019, 1, 1),
                activity: catalog.activity(7).unwrap(),
            },
            ActivityRecord {
                date: date(2019, 1, 2),
                activity: catalog.activity(1).unwrap(),
            },
        ];
        let document = Document::new(Schema::Composite, &catalog, &records).unwrap();
        let value = to_value(&document);
        assert_eq!(
            value["activities"],
            json!({
                "act-0": {"date": "2019-01-01", "name": "Cycling", "categoryId": "cat-cycling"},
                "act-1": {"date": "2019-01-02", "name": "Sick", "categoryId": "cat-rest"},
            })
        );
        assert_eq!(
            value["categories"]["cat-rest"],
            json!({
                "name": "Rest & Recovery",
                "active": false,
                "description": "Rest days",
                "activityNames": ["Nothing", "Sick"],
            })
        );
        assert_eq!(value["categories"].as_object().unwrap().len(), 5);
        assert_eq!(
            document.summary().to_string(),
            "Generated 2 activities across 5 categories"
        );
    }

    #[test]
    fn test_composite_keeps_generation_order() {
        let catalog = Catalog::categorized().unwrap();
        let records: Vec<_> = (1..=12)
            .map(|day| ActivityRecord {
                date: date(2019, 1, day),
                activity: catalog.activity(0).unwrap(),
            })
            .collect();
        let document = Document::new(Schema::Composite, &catalog, &records).unwrap();
        let mut out = Vec::new();
        document.to_writer(&mut out, OutputFormat::Compact).unwrap();
        let text = String::from_utf8(out).unwrap();
        let act_2 = text.find("\"act-2\"").unwrap();
        let act_10 = text.find("\"act-10\"").unwrap();
        assert!(act_2 < act_10);
        let cat_sports = text.find("\"cat-sports\":{").unwrap();
        let cat_rest = text.find("\"cat-rest\":{").unwrap();
        assert!(cat_sports < cat_rest);
    }

    #[test]
    fn test_composite_requires_categories() {
        let catalog = Catalog::classic().unwrap();
        let res = Document::new(Schema::Composite, &catalog, &[]);
        assert!(matches!(res, Err(GenError::Uncategorized(name)) if name == "nothing"));

        let catalog = Catalog::new(vec![Activity::new("X", true)], Vec::new(), vec![1.0]).unwrap();
        assert!(Document::new(Schema::Nested, &catalog, &[]).is_ok());
    }

    #[test]
    fn test_output_formats() {
        let catalog = Catalog::classic().unwrap();
        let records = vec![ActivityRecord {
            date: date(2019, 1, 1),
            activity: catalog.activity(4).unwrap(),
        }];
        let document = Document::new(Schema::DateKeyed, &catalog, &records).unwrap();

        let mut compact = Vec::new();
        document.to_writer(&mut compact, OutputFormat::Compact).unwrap();
        assert_eq!(compact, br#"[{"2019-01-01":"running"}]"#.to_vec());

        let mut pretty = Vec::new();
        document.to_writer(&mut pretty, OutputFormat::Pretty).unwrap();
        assert_eq!(
            String::from_utf8(pretty).unwrap(),
            "[\n  {\n    \"2019-01-01\": \"running\"\n  }\n]"
        );
    }
}
