use crate::SortKey;

/// Opaque resumption token marking where the next page begins.
///
/// The value is produced by the data source's previous response and must
/// be treated as opaque by consumers: depending on the active sort it
/// may be a record id or a sort-field value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A single fetched row: the record's key plus the decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row<T> {
    pub id: String,
    pub record: T,
}

impl<T> Row<T> {
    pub fn new(id: impl Into<String>, record: T) -> Self {
        Self { id: id.into(), record }
    }
}

/// One page of results, with the cursor resuming after it.
///
/// `next` being absent is the sole termination signal: consumers must
/// not assume a fixed page count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page<T> {
    pub rows: Vec<Row<T>>,
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<Row<T>>, next: Option<Cursor>) -> Self {
        Self { rows, next }
    }

    /// Shapes a raw result set into a page, deriving the `next` cursor.
    ///
    /// The cursor is present iff the result filled the page
    /// (`rows.len() >= page_size`). Its value is the last row's
    /// sort-field value when a sort key is active (read through
    /// `sort_value`), or the last row's id under the default order.
    /// A last row whose sort field is absent yields no cursor, ending
    /// pagination early rather than resuming from a bogus position.
    pub fn with_cursor<F>(
        rows: Vec<Row<T>>,
        page_size: usize,
        sort: Option<&SortKey>,
        mut sort_value: F,
    ) -> Self
    where
        F: FnMut(&T, &str) -> Option<String>,
    {
        let full = page_size > 0 && rows.len() >= page_size;
        let next = if full {
            rows.last().and_then(|last| match sort {
                Some(key) => sort_value(&last.record, &key.field).map(Cursor::from),
                None => Some(Cursor::from(last.id.clone())),
            })
        } else {
            None
        };
        Self { rows, next }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<Row<u32>> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Row::new(*id, i as u32))
            .collect()
    }

    #[test]
    fn full_page_resumes_after_the_last_id() {
        let page = Page::with_cursor(rows(&["a", "b"]), 2, None, |_, _| None);
        assert_eq!(page.next, Some(Cursor::from("b")));
    }

    #[test]
    fn short_page_ends_pagination() {
        let page = Page::with_cursor(rows(&["a"]), 2, None, |_, _| None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn active_sort_resumes_after_the_sort_value() {
        let sort = SortKey::ascending("price");
        let page = Page::with_cursor(rows(&["a", "b"]), 2, Some(&sort), |record, field| {
            assert_eq!(field, "price");
            Some(format!("{record}00"))
        });
        assert_eq!(page.next, Some(Cursor::from("100")));
    }

    #[test]
    fn missing_sort_value_ends_pagination() {
        let sort = SortKey::ascending("price");
        let page = Page::with_cursor(rows(&["a", "b"]), 2, Some(&sort), |_, _| None);
        assert_eq!(page.next, None);
    }

    #[test]
    fn zero_page_size_never_yields_a_cursor() {
        let page = Page::with_cursor(rows(&["a"]), 0, None, |_, _| None);
        assert_eq!(page.next, None);
    }
}
