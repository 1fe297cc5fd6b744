use chrono::NaiveDate;
use contracts::dashboards::d402_superstore::{OrderLine, TransactionRecord};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

static DATASET: OnceCell<Arc<Dataset>> = OnceCell::new();

/// Accepted `Order Date` layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid order date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: empty value in column '{column}'")]
    EmptyField { row: usize, column: &'static str },

    #[error("dataset is not initialized")]
    NotInitialized,

    #[error("dataset is already initialized")]
    AlreadyInitialized,
}

/// Column layout of the superstore export. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Profit")]
    profit: f64,
    #[serde(rename = "Discount")]
    discount: f64,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Segment")]
    segment: String,
    #[serde(rename = "Ship Mode")]
    ship_mode: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<TransactionRecord, DatasetError> {
        let order_date = parse_order_date(&self.order_date).ok_or_else(|| {
            DatasetError::InvalidDate {
                row,
                value: self.order_date.clone(),
            }
        })?;

        let text_columns = [
            ("State", &self.state),
            ("Region", &self.region),
            ("Category", &self.category),
            ("Sub-Category", &self.sub_category),
            ("Segment", &self.segment),
            ("Ship Mode", &self.ship_mode),
            ("Customer Name", &self.customer_name),
        ];
        if let Some(&(column, _)) = text_columns.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(DatasetError::EmptyField { row, column });
        }

        Ok(TransactionRecord::new(OrderLine {
            order_date,
            sales: self.sales,
            profit: self.profit,
            discount: self.discount,
            quantity: self.quantity,
            state: self.state,
            region: self.region,
            category: self.category,
            sub_category: self.sub_category,
            segment: self.segment,
            ship_mode: self.ship_mode,
            customer_name: self.customer_name,
        }))
    }
}

fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// The in-memory transaction table. Read-only after loading.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parse CSV text (header row required).
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DatasetError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| DatasetError::Io {
                path: PathBuf::from("<reader>"),
                source,
            })?;

        // Exports are not always UTF-8
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            tracing::warn!("Dataset is not valid UTF-8; undecodable bytes replaced with U+FFFD");
        }
        let text = text.trim_start_matches('\u{FEFF}');

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (i, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
            // header is line 1
            let row = i + 2;
            records.push(result?.into_record(row)?);
        }

        Ok(Self::new(records))
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }
}

/// Loads the CSV once and publishes it as the shared snapshot.
pub fn initialize_dataset(path: &Path) -> Result<Arc<Dataset>, DatasetError> {
    if DATASET.get().is_some() {
        return Err(DatasetError::AlreadyInitialized);
    }

    tracing::info!("Loading superstore dataset from {}", path.display());
    let dataset = Arc::new(Dataset::load(path)?);
    tracing::info!("Loaded {} transaction records", dataset.len());
    if dataset.is_empty() {
        tracing::warn!("Dataset at {} has no rows", path.display());
    }

    DATASET
        .set(dataset.clone())
        .map_err(|_| DatasetError::AlreadyInitialized)?;
    Ok(dataset)
}

/// Shared read-only snapshot loaded by [`initialize_dataset`].
pub fn get_dataset() -> Result<Arc<Dataset>, DatasetError> {
    DATASET.get().cloned().ok_or(DatasetError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Row ID,Order Date,Ship Mode,Customer Name,Segment,State,Region,Category,Sub-Category,Sales,Quantity,Discount,Profit";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parses_rows_and_derives_period() {
        let text = csv(&[
            "1,11/8/2016,Second Class,Claire Gute,Consumer,Kentucky,South,Furniture,Bookcases,261.96,2,0,41.9136",
            "2,2015-06-12,Standard Class,Darrin Van Huff,Corporate,California,West,Office Supplies,Labels,14.62,2,0,6.8714",
        ]);

        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.line.customer_name, "Claire Gute");
        assert_eq!(first.line.sub_category, "Bookcases");
        assert_eq!(first.line.quantity, 2);
        assert_eq!(first.period.year, 2016);
        assert_eq!(first.period.month_number, 11);
        assert_eq!(first.period.month_name, "November");

        let second = &dataset.records()[1];
        assert_eq!(second.period.year, 2015);
        assert_eq!(second.period.month_name, "June");
    }

    #[test]
    fn test_bom_and_quoted_fields() {
        let text = format!(
            "\u{FEFF}{}",
            csv(&["7,1/2/2017,First Class,\"O'Brien, Pat\",Home Office,Texas,Central,Technology,Phones,\"1,000.5\",1,0.2,10"])
        );

        // "1,000.5" is not a valid float; quoted commas in names are fine
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));

        let text = format!(
            "\u{FEFF}{}",
            csv(&["7,1/2/2017,First Class,\"O'Brien, Pat\",Home Office,Texas,Central,Technology,Phones,1000.5,1,0.2,10"])
        );
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].line.customer_name, "O'Brien, Pat");
    }

    #[test]
    fn test_invalid_date_reports_row() {
        let text = csv(&[
            "1,11/8/2016,Second Class,Claire Gute,Consumer,Kentucky,South,Furniture,Bookcases,261.96,2,0,41.9136",
            "2,not-a-date,Second Class,Claire Gute,Consumer,Kentucky,South,Furniture,Chairs,731.94,3,0,219.582",
        ]);

        match Dataset::from_reader(text.as_bytes()) {
            Err(DatasetError::InvalidDate { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_required_field() {
        let text = csv(&[
            "1,11/8/2016,Second Class,,Consumer,Kentucky,South,Furniture,Bookcases,261.96,2,0,41.9136",
        ]);

        match Dataset::from_reader(text.as_bytes()) {
            Err(DatasetError::EmptyField { row, column }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Customer Name");
            }
            other => panic!("expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let dataset = Dataset::from_reader(HEADER.as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_non_utf8_bytes_are_replaced() {
        let mut bytes = csv(&[]).into_bytes();
        // "José Ruiz" in Windows-1252
        bytes.extend_from_slice(b"\n1,3/4/2017,First Class,Jos\xE9 Ruiz,Consumer,Ohio,East,Technology,Phones,10,1,0,2");

        let dataset = Dataset::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].line.customer_name, "Jos\u{FFFD} Ruiz");
    }

    #[test]
    fn test_get_before_initialize_is_an_error() {
        // no unit test initializes the global snapshot
        assert!(matches!(get_dataset(), Err(DatasetError::NotInitialized)));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
