use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// One spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell: numbers, booleans (1/0) and text holding a plain float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Text used for category labels and legends.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            Cell::Text(s) => f.write_str(s.trim()),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// A worksheet's content: one header row plus data rows.
///
/// The first column is the categorical/independent axis, the following
/// columns hold values. Rows are always padded to the header width.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<H, S>(headers: H, rows: Vec<Vec<Cell>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let h: String = h.into();
                let h = h.trim().to_string();
                if h.is_empty() { format!("Unnamed: {i}") } else { h }
            })
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Cell::Empty);
                r
            })
            .collect();
        Self { headers, rows }
    }

    /// Build from raw grid rows where the first row is the header.
    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let header_row = grid.remove(0);
        let width = grid
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(header_row.len()))
            .max()
            .unwrap_or(0);
        let mut headers: Vec<String> = header_row.iter().map(Cell::label).collect();
        headers.resize(width, String::new());
        Self::new(headers, grid)
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows that hold at least one non-empty cell.
    pub fn non_empty_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.iter().any(|c| !c.is_empty()))
            .count()
    }

    pub fn header(&self, col: usize) -> &str {
        self.headers.get(col).map(String::as_str).unwrap_or("")
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |r| r.get(col).unwrap_or(&EMPTY_CELL))
    }
}

/// Content of a worksheet after reading: a table, or the reason it could not be read.
pub type SheetContent = Result<Table, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub content: SheetContent,
}

/// An uploaded workbook: named worksheets in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
