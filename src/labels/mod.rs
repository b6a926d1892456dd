//! Class label tables.
//!
//! A label table maps class indices to names. It is loaded once per detector
//! and never mutated afterwards; detections copy the resolved name out.

use crate::util::{YoloPostError, YoloPostResult};

/// Ordered, immutable list of class names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    /// Creates a table from owned names.
    pub fn new(names: Vec<String>) -> YoloPostResult<Self> {
        if names.is_empty() {
            return Err(YoloPostError::EmptyLabels);
        }
        Ok(Self { names })
    }

    /// Parses a label resource with one label per line.
    ///
    /// Reading stops at the first empty line, so a trailing blank section (or
    /// anything after it) is ignored. A trailing `\r` is stripped.
    pub fn from_text(text: &str) -> YoloPostResult<Self> {
        let names = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .take_while(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self::new(names)
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name for `class_index`.
    pub fn get(&self, class_index: usize) -> Option<&str> {
        self.names.get(class_index).map(String::as_str)
    }

    /// Returns all names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Checks that the table covers exactly `num_classes` class planes.
    pub fn ensure_covers(&self, num_classes: usize) -> YoloPostResult<()> {
        if self.names.len() != num_classes {
            return Err(YoloPostError::LabelCountMismatch {
                expected: num_classes,
                got: self.names.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for LabelTable {
    type Error = YoloPostError;

    fn try_from(names: Vec<String>) -> YoloPostResult<Self> {
        Self::new(names)
    }
}

impl<'a> TryFrom<&'a [&'a str]> for LabelTable {
    type Error = YoloPostError;

    fn try_from(names: &'a [&'a str]) -> YoloPostResult<Self> {
        Self::new(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::LabelTable;
    use crate::util::YoloPostError;

    #[test]
    fn from_text_stops_at_first_blank_line() {
        let table = LabelTable::from_text("person\r\nbicycle\ncar\n\ndog\n").unwrap();
        assert_eq!(table.names(), ["person", "bicycle", "car"]);
        assert_eq!(table.get(2), Some("car"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn from_text_rejects_leading_blank_line() {
        assert_eq!(
            LabelTable::from_text("\nperson\n").err(),
            Some(YoloPostError::EmptyLabels)
        );
    }

    #[test]
    fn ensure_covers_reports_counts() {
        let table = LabelTable::try_from(&["a", "b"][..]).unwrap();
        assert!(table.ensure_covers(2).is_ok());
        assert_eq!(
            table.ensure_covers(80).err(),
            Some(YoloPostError::LabelCountMismatch {
                expected: 80,
                got: 2,
            })
        );
    }
}
