use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid selector \"{selector}\", error({reason})")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

fn selector(css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|err| SelectorError {
        selector: css.to_string(),
        reason: err.to_string(),
    })
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// A parsed snapshot of a rendered page.
///
/// Snapshots are read synchronously; `scraper::Html` is not `Send`, so never hold one across an
/// `.await`.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }

    /// Visible text of every element matching `css`, in document order.
    pub fn texts(&self, css: &str) -> Result<Vec<String>, SelectorError> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).map(text_of).collect())
    }

    /// For every element matching `outer`, the text of each descendant matching `inner`.
    ///
    /// e.g., `groups("[data-test=\"fin-row\"]", "[data-test=\"fin-col\"]")` returns the cell texts of
    /// each financial row.
    pub fn groups(&self, outer: &str, inner: &str) -> Result<Vec<Vec<String>>, SelectorError> {
        let outer = selector(outer)?;
        let inner = selector(inner)?;
        Ok(self
            .html
            .select(&outer)
            .map(|element| element.select(&inner).map(text_of).collect())
            .collect())
    }

    /// Every `<table>` on the page, in document order.
    pub fn tables(&self) -> Vec<Table> {
        // both selectors are static and valid
        let (Ok(table_sel), Ok(row_sel), Ok(cell_sel)) =
            (selector("table"), selector("tr"), selector("td"))
        else {
            return vec![];
        };

        self.html
            .select(&table_sel)
            .map(|table| Table {
                rows: table
                    .select(&row_sel)
                    .map(|row| Row {
                        cells: row.select(&cell_sel).map(text_of).collect(),
                        in_body: row.ancestors().any(|node| {
                            node.value()
                                .as_element()
                                .map_or(false, |el| el.name() == "tbody")
                        }),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Cell texts of a single `<table>`; header cells (`<th>`) are not included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub in_body: bool,
}

impl Table {
    /// Build a table from plain cell texts; every row is treated as a body row.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| Row {
                    cells: cells.into_iter().map(Into::into).collect(),
                    in_body: true,
                })
                .collect(),
        }
    }

    /// Rows within the table's `<tbody>`.
    pub fn body(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.in_body)
    }
}
